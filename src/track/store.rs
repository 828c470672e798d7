use crate::time::{ReferenceZone, TimeOffset};
use crate::track::error::TrackError;
use crate::track::structs::{RawTrackRecord, TrackFix, TrackPoint};
use chrono::NaiveDateTime;
use log::{debug, warn};

/// Deduplicated, time-sorted track points with nearest-time lookup.
///
/// Never empty: [`TrackStore::build`] refuses to produce a store without points.
#[derive(Debug, Clone)]
pub struct TrackStore {
    points: Vec<TrackPoint>,
    zone: ReferenceZone,
    malformed: usize,
    duplicates_removed: usize,
}

impl TrackStore {
    /// Parses, sorts and deduplicates raw track records.
    ///
    /// Records that fail to parse are skipped and counted. `offset` is resolved once,
    /// at the earliest fix, and that single offset converts every point. Among records
    /// sharing a timestamp the first one seen is kept.
    ///
    /// # Errors
    ///
    /// * [`TrackError::EmptyInput`] if `records` is empty.
    /// * [`TrackError::NoValidPoints`] if no record could be parsed.
    pub fn build(records: &[RawTrackRecord], offset: TimeOffset) -> Result<Self, TrackError> {
        if records.is_empty() {
            return Err(TrackError::EmptyInput);
        }
        let mut malformed = 0;
        let fixes: Vec<TrackFix> = records
            .iter()
            .filter_map(|raw| match TrackFix::from_raw(raw) {
                Ok(fix) => Some(fix),
                Err(e) => {
                    debug!("Skipping track point: {e}");
                    malformed += 1;
                    None
                }
            })
            .collect();
        let Some(earliest) = fixes.iter().min_by_key(|fix| fix.utc) else {
            return Err(TrackError::NoValidPoints { malformed });
        };
        if malformed > 0 {
            warn!("Skipped {malformed} malformed track point(s)");
        }

        let zone = offset.resolve(
            earliest.latitude.degrees,
            earliest.longitude.degrees,
            earliest.utc,
        );
        let mut points: Vec<TrackPoint> = fixes
            .into_iter()
            .map(|fix| fix.into_point(&zone))
            .collect();

        // Stable sort, so the first-seen point of equal timestamps stays in front for dedup.
        points.sort_by_key(TrackPoint::time_key);
        let parsed = points.len();
        points.dedup_by_key(|point| point.time_key());

        Ok(Self {
            duplicates_removed: parsed - points.len(),
            points,
            zone,
            malformed,
        })
    }

    /// The point whose timestamp is closest to `timestamp`. The earlier point wins ties.
    pub fn nearest(&self, timestamp: NaiveDateTime) -> &TrackPoint {
        let index = self.points.partition_point(|p| p.timestamp < timestamp);
        let before = index.checked_sub(1).and_then(|i| self.points.get(i));
        let after = self.points.get(index);

        match (before, after) {
            (Some(before), Some(after)) => {
                if timestamp - before.timestamp <= after.timestamp - timestamp {
                    before
                } else {
                    after
                }
            }
            (Some(point), None) | (None, Some(point)) => point,
            (None, None) => unreachable!("a TrackStore always holds at least one point"),
        }
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &TrackPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TrackPoint {
        &self.points[self.points.len() - 1]
    }

    /// Zone the track timestamps were converted into.
    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    pub fn malformed(&self) -> usize {
        self.malformed
    }

    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    /// Number of records that parsed, before deduplication.
    pub fn parsed(&self) -> usize {
        self.points.len() + self.duplicates_removed
    }
}
