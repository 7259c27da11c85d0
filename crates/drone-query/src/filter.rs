//! Filter stage: every active predicate must hold.

use drone_domain::{DroneRecord, FAIL_TOKEN, PASS_TOKEN};

use crate::config::{ColumnFilter, QueryConfig, StatusFilter};

impl StatusFilter {
    /// Status predicate for one drone.
    #[must_use]
    pub fn matches(&self, drone: &DroneRecord) -> bool {
        match self {
            Self::Ready => drone.is_ready(),
            Self::NotReady => !drone.is_ready(),
            Self::NeedsRepair => drone.needs_repair(),
            // The first disjunct is subsumed by the second: anything other
            // than the pass token counts as a camera issue.
            Self::CameraIssues => drone.camera == FAIL_TOKEN || drone.camera != PASS_TOKEN,
            Self::FlightTestPassed => drone.flight_test_passed(),
        }
    }
}

impl ColumnFilter {
    /// Stringified column value equals the filter value exactly. Unknown
    /// columns never match.
    #[must_use]
    pub fn matches(&self, drone: &DroneRecord) -> bool {
        self.field()
            .is_some_and(|field| drone.field_value(field) == self.value.as_str())
    }
}

/// Keep the drones that pass every predicate in `config`, preserving order.
#[must_use]
pub fn apply_filter(drones: &[DroneRecord], config: &QueryConfig) -> Vec<DroneRecord> {
    let needle = config.search_term.to_lowercase();
    drones
        .iter()
        .filter(|drone| matches_lowered(drone, config, &needle))
        .cloned()
        .collect()
}

/// Single-record form of [`apply_filter`].
#[must_use]
pub fn matches_query(drone: &DroneRecord, config: &QueryConfig) -> bool {
    matches_lowered(drone, config, &config.search_term.to_lowercase())
}

fn matches_lowered(drone: &DroneRecord, config: &QueryConfig, needle: &str) -> bool {
    matches_search(drone, needle)
        && config.status_filter.is_none_or(|status| status.matches(drone))
        && config
            .type_filter
            .as_deref()
            .is_none_or(|kind| kind.is_empty() || drone.drone_type == kind)
        && config
            .battery_filter
            .as_deref()
            .is_none_or(|battery| battery.is_empty() || drone.battery_type == battery)
        && config.column_filters.iter().all(|filter| filter.matches(drone))
}

/// Case-insensitive substring match on name, type and notes.
fn matches_search(drone: &DroneRecord, needle: &str) -> bool {
    needle.is_empty()
        || drone.quad_name.to_lowercase().contains(needle)
        || drone.drone_type.to_lowercase().contains(needle)
        || drone.notes.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drone_domain::DroneField;
    use fake::{Fake, Faker};

    fn drone(id: i64, name: &str, kind: &str, camera: &str, ready: &str) -> DroneRecord {
        DroneRecord {
            quad_name: name.to_string(),
            drone_type: kind.to_string(),
            camera: camera.to_string(),
            ready_for_field_testing: ready.to_string(),
            ..DroneRecord::new(id)
        }
    }

    fn ids(drones: &[DroneRecord]) -> Vec<i64> {
        drones.iter().map(|d| d.id).collect()
    }

    fn fleet() -> Vec<DroneRecord> {
        let mut fleet = vec![
            drone(1, "Mako", "Freestyle", "✓", "✓"),
            drone(2, "Tiny Whoop", "Cinewhoop", "X", "X"),
            drone(3, "Razor", "Racing", "✗", "✓"),
            drone(4, "Nazgul", "Freestyle", "-", "-"),
            drone(5, "Apex", "Racing", "", ""),
        ];
        fleet[1].notes = "Replace MOTOR 2".into();
        fleet[2].flight_test = "✓".into();
        fleet[2].battery_type = "4S".into();
        fleet[3].battery_type = "6S".into();
        fleet[3].notes = "   ".into();
        fleet
    }

    #[test]
    fn test_no_filters_passes_everything() {
        let fleet = fleet();
        assert_eq!(apply_filter(&fleet, &QueryConfig::default()), fleet);
    }

    #[test]
    fn test_ready_example() {
        let fleet = vec![drone(1, "", "", "", "✓"), drone(2, "", "", "", "X")];
        let config = QueryConfig {
            status_filter: Some(StatusFilter::Ready),
            ..QueryConfig::default()
        };
        assert_eq!(ids(&apply_filter(&fleet, &config)), vec![1]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_name_type_notes() {
        let fleet = fleet();
        let search = |term: &str| {
            let config = QueryConfig {
                search_term: term.to_string(),
                ..QueryConfig::default()
            };
            ids(&apply_filter(&fleet, &config))
        };

        assert_eq!(search("MAKO"), vec![1]);
        assert_eq!(search("racing"), vec![3, 5]);
        assert_eq!(search("motor"), vec![2]);
        assert_eq!(search("free"), vec![1, 4]);
        assert!(search("6S").is_empty());
    }

    #[test]
    fn test_status_predicates() {
        let fleet = fleet();
        let status = |s: StatusFilter| {
            let config = QueryConfig {
                status_filter: Some(s),
                ..QueryConfig::default()
            };
            ids(&apply_filter(&fleet, &config))
        };

        assert_eq!(status(StatusFilter::Ready), vec![1, 3]);
        assert_eq!(status(StatusFilter::NotReady), vec![2, 4, 5]);
        assert_eq!(status(StatusFilter::NeedsRepair), vec![2]);
        assert_eq!(status(StatusFilter::CameraIssues), vec![2, 3, 4, 5]);
        assert_eq!(status(StatusFilter::FlightTestPassed), vec![3]);
    }

    #[test]
    fn test_type_and_battery_filters_are_exact() {
        let fleet = fleet();
        let config = QueryConfig {
            type_filter: Some("Racing".into()),
            battery_filter: Some("4S".into()),
            ..QueryConfig::default()
        };
        assert_eq!(ids(&apply_filter(&fleet, &config)), vec![3]);

        let config = QueryConfig {
            type_filter: Some("racing".into()),
            ..QueryConfig::default()
        };
        assert!(apply_filter(&fleet, &config).is_empty());
    }

    #[test]
    fn test_empty_type_and_battery_filters_are_unset() {
        let fleet = fleet();
        let config = QueryConfig {
            type_filter: Some(String::new()),
            battery_filter: Some(String::new()),
            ..QueryConfig::default()
        };
        assert_eq!(apply_filter(&fleet, &config), fleet);
        assert!(!config.filters_active());
    }

    #[test]
    fn test_column_filters_all_must_match() {
        let fleet = fleet();
        let mut config = QueryConfig::default();
        config.set_column_filter("type", "Freestyle");
        assert_eq!(ids(&apply_filter(&fleet, &config)), vec![1, 4]);

        config.set_column_filter("readyForFieldTesting", "✓");
        assert_eq!(ids(&apply_filter(&fleet, &config)), vec![1]);
    }

    #[test]
    fn test_column_filter_on_id_uses_decimal_text() {
        let fleet = fleet();
        let mut config = QueryConfig::default();
        config.set_column_filter("id", "4");
        assert_eq!(ids(&apply_filter(&fleet, &config)), vec![4]);
    }

    #[test]
    fn test_unknown_column_never_matches() {
        let fleet = fleet();
        let mut config = QueryConfig::default();
        config.set_column_filter("wingspan", "");
        assert!(apply_filter(&fleet, &config).is_empty());
        config.set_column_filter("wingspan", "undefined");
        assert!(apply_filter(&fleet, &config).is_empty());
    }

    #[test]
    fn test_contradictory_column_and_type_filter() {
        let fleet = fleet();
        let mut config = QueryConfig {
            type_filter: Some("Freestyle".into()),
            ..QueryConfig::default()
        };
        config.set_column_filter("type", "Racing");
        assert!(apply_filter(&fleet, &config).is_empty());
    }

    #[test]
    fn test_matches_query_agrees_with_apply_filter() {
        let fleet = fleet();
        let config = QueryConfig {
            search_term: "a".into(),
            status_filter: Some(StatusFilter::CameraIssues),
            ..QueryConfig::default()
        };
        let expected: Vec<i64> = fleet
            .iter()
            .filter(|d| matches_query(d, &config))
            .map(|d| d.id)
            .collect();
        assert_eq!(ids(&apply_filter(&fleet, &config)), expected);
    }

    #[test]
    fn test_adding_a_predicate_never_grows_the_result() {
        const TYPES: [&str; 3] = ["Freestyle", "Racing", "Cinewhoop"];
        const TOKENS: [&str; 4] = ["✓", "X", "✗", "-"];

        for _ in 0..25 {
            let size: usize = (1..30).fake();
            let fleet: Vec<DroneRecord> = (0..size)
                .map(|i| {
                    let mut d = drone(
                        i as i64 + 1,
                        &Faker.fake::<String>(),
                        TYPES[(0..TYPES.len()).fake::<usize>()],
                        TOKENS[(0..TOKENS.len()).fake::<usize>()],
                        TOKENS[(0..TOKENS.len()).fake::<usize>()],
                    );
                    d.flight_test = TOKENS[(0..TOKENS.len()).fake::<usize>()].to_string();
                    d
                })
                .collect();

            let mut config = QueryConfig::default();
            let mut previous = apply_filter(&fleet, &config).len();
            assert_eq!(previous, fleet.len());

            let steps: [fn(&mut QueryConfig); 4] = [
                |c| c.status_filter = Some(StatusFilter::CameraIssues),
                |c| c.type_filter = Some("Racing".into()),
                |c| c.set_column_filter(DroneField::FlightTest.name(), "✓"),
                |c| c.search_term = "a".into(),
            ];
            for step in steps {
                step(&mut config);
                let current = apply_filter(&fleet, &config).len();
                assert!(current <= previous);
                previous = current;
            }
        }
    }
}
