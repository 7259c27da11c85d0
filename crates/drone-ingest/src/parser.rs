//! Positional CSV parser for fleet rosters.
//!
//! The header line is skipped without inspection; columns are mapped by
//! position onto [`DroneField::ALL`].

use drone_domain::{DroneField, DroneRecord};
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Parse roster text into drone records.
///
/// Returns an empty vector when there is no data row. Every non-blank line
/// after the header yields exactly one record, however degenerate.
#[must_use]
pub fn parse_csv(raw: &str) -> Vec<DroneRecord> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() < 2 {
        debug!(lines = lines.len(), "No data rows in roster text");
        return Vec::new();
    }

    let drones: Vec<DroneRecord> = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| build_record(&split_row(line), index))
        .collect();

    debug!(
        lines = lines.len(),
        records = drones.len(),
        "Parsed roster"
    );
    drones
}

/// Split one line on commas, honoring double-quoted spans.
///
/// A quote toggles the quoted state unless the previous character is a
/// backslash; toggling quotes are dropped, escaped ones are kept verbatim
/// along with their backslash. An unbalanced quote swallows the rest of
/// the line.
#[must_use]
pub fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut previous: Option<char> = None;

    for ch in line.chars() {
        if ch == QUOTE && previous != Some(ESCAPE) {
            inside_quotes = !inside_quotes;
        } else if ch == DELIMITER && !inside_quotes {
            values.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        previous = Some(ch);
    }

    values.push(current);
    values
}

/// Map split values onto a record. `index` is the zero-based position among
/// surviving data rows and becomes the fallback id.
fn build_record(values: &[String], index: usize) -> DroneRecord {
    let fallback_id = i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(1));
    let id = values
        .first()
        .and_then(|raw| parse_id(raw))
        .unwrap_or(fallback_id);

    let mut record = DroneRecord::new(id);
    for field in DroneField::ALL.iter().skip(1) {
        if let (Some(slot), Some(value)) = (record.text_mut(*field), values.get(field.position())) {
            slot.clone_from(value);
        }
    }
    record
}

/// Numeric id cell: decimal integers, whole-valued floats such as `3.0` or
/// `1e1`, and `0x`/`0o`/`0b` prefixed integers. Blank, fractional,
/// non-numeric and zero ids all fall back to the row position.
fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| parse_prefixed(raw))
        .or_else(|| parse_whole_float(raw))
        .filter(|id| *id != 0)
}

fn parse_prefixed(raw: &str) -> Option<i64> {
    let (prefix, digits) = raw.split_at_checked(2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn parse_whole_float(raw: &str) -> Option<i64> {
    let value = raw.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}
