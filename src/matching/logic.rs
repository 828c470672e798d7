use crate::track::{Coordinate, TrackStore};
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Where a photo falls relative to the track.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchOutcome {
    /// A track point lies within the tolerance window.
    Matched {
        latitude: Coordinate,
        longitude: Coordinate,
    },
    /// Taken before tracking started (or before a gap in the track).
    Before,
    /// Taken after tracking ended (or after a gap in the track).
    After,
}

/// Matches a photo timestamp against the track.
///
/// A photo exactly `max_gap` away from its nearest point still matches.
pub fn match_photo(store: &TrackStore, timestamp: NaiveDateTime, max_gap: TimeDelta) -> MatchOutcome {
    let nearest = store.nearest(timestamp);
    if (nearest.timestamp - timestamp).abs() <= max_gap {
        MatchOutcome::Matched {
            latitude: nearest.latitude.clone(),
            longitude: nearest.longitude.clone(),
        }
    } else if timestamp < nearest.timestamp {
        MatchOutcome::Before
    } else {
        MatchOutcome::After
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOffset;
    use crate::track::RawTrackRecord;
    use chrono::{NaiveDate, Offset, Utc};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn store(points: &[(&str, &str)]) -> TrackStore {
        let records: Vec<_> = points
            .iter()
            .map(|(lat, time)| RawTrackRecord {
                latitude: lat.to_string(),
                longitude: "37.6".to_string(),
                time: time.to_string(),
                file: "test.gpx".to_string(),
            })
            .collect();
        TrackStore::build(&records, TimeOffset::Fixed(Utc.fix())).unwrap()
    }

    fn matched_latitude(outcome: &MatchOutcome) -> Option<&str> {
        match outcome {
            MatchOutcome::Matched { latitude, .. } => Some(latitude.text.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_half_hour_track_with_quarter_hour_gap() {
        let store = store(&[
            ("10.0", "2021-07-10T10:00:00Z"),
            ("10.5", "2021-07-10T10:30:00Z"),
        ]);
        let gap = TimeDelta::minutes(15);

        assert_eq!(
            matched_latitude(&match_photo(&store, at(10, 10, 0), gap)),
            Some("10.0")
        );
        assert_eq!(
            matched_latitude(&match_photo(&store, at(10, 20, 0), gap)),
            Some("10.5")
        );
        assert_eq!(match_photo(&store, at(9, 40, 0), gap), MatchOutcome::Before);
        assert_eq!(match_photo(&store, at(10, 50, 0), gap), MatchOutcome::After);
    }

    #[test]
    fn test_gap_boundary_is_inclusive() {
        let store = store(&[("1.0", "2021-07-10T10:00:00Z")]);
        let gap = TimeDelta::minutes(15);

        assert!(matches!(
            match_photo(&store, at(9, 45, 0), gap),
            MatchOutcome::Matched { .. }
        ));
        assert!(matches!(
            match_photo(&store, at(10, 15, 0), gap),
            MatchOutcome::Matched { .. }
        ));
        assert_eq!(match_photo(&store, at(9, 44, 59), gap), MatchOutcome::Before);
        assert_eq!(match_photo(&store, at(10, 15, 1), gap), MatchOutcome::After);
    }

    #[test]
    fn test_gap_inside_the_track() {
        // Logger switched off between 10:05 and 11:00.
        let store = store(&[
            ("1.0", "2021-07-10T10:00:00Z"),
            ("1.1", "2021-07-10T10:05:00Z"),
            ("2.0", "2021-07-10T11:00:00Z"),
        ]);
        let gap = TimeDelta::minutes(15);

        // Closer to the end of the first stretch, but too far from it.
        assert_eq!(match_photo(&store, at(10, 25, 0), gap), MatchOutcome::After);
        // Closer to the start of the second stretch.
        assert_eq!(match_photo(&store, at(10, 40, 0), gap), MatchOutcome::Before);
        assert_eq!(
            matched_latitude(&match_photo(&store, at(10, 50, 0), gap)),
            Some("2.0")
        );
    }

    #[test]
    fn test_zero_gap_requires_exact_time() {
        let store = store(&[("1.0", "2021-07-10T10:00:00Z")]);
        assert!(matches!(
            match_photo(&store, at(10, 0, 0), TimeDelta::zero()),
            MatchOutcome::Matched { .. }
        ));
        assert_eq!(
            match_photo(
                &store,
                at(10, 0, 0) + TimeDelta::milliseconds(1),
                TimeDelta::zero()
            ),
            MatchOutcome::After
        );
    }
}
