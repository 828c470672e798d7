use crate::geotag::{format_geotag, GeoTag, GeoTagOptions};
use crate::matching::logic::{match_photo, MatchOutcome};
use crate::photo::{PhotoError, PhotoIssue, PhotoTimestamp};
use crate::track::TrackStore;
use chrono::TimeDelta;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Receives the geotag of every matched photo.
pub trait TagSink {
    fn apply(&mut self, photo: &PhotoTimestamp, geotag: &GeoTag) -> Result<(), PhotoError>;
}

/// Outcome of a batch, as photo identifiers in input order.
///
/// Every processed photo appears in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Matched and tagged.
    pub matched: Vec<String>,
    /// Taken before the nearest track point, outside the tolerance window.
    pub before: Vec<String>,
    /// Taken after the nearest track point, outside the tolerance window.
    pub after: Vec<String>,
    /// Matched, but the sink failed to tag them.
    pub failed: Vec<PhotoIssue>,
}

impl Report {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn total(&self) -> usize {
        self.matched.len() + self.before.len() + self.after.len() + self.failed.len()
    }

    fn record<S: TagSink + ?Sized>(
        mut self,
        photo: &PhotoTimestamp,
        outcome: MatchOutcome,
        options: &GeoTagOptions,
        sink: &mut S,
    ) -> Self {
        match outcome {
            MatchOutcome::Matched {
                latitude,
                longitude,
            } => {
                let geotag = format_geotag(latitude.degrees, longitude.degrees, options);
                match sink.apply(photo, &geotag) {
                    Ok(()) => {
                        debug!("{}: tagged {}, {}", photo.id, latitude.text, longitude.text);
                        self.matched.push(photo.id.clone());
                    }
                    Err(e) => {
                        warn!("{}: matched but not updated: {e}", photo.id);
                        self.failed.push(PhotoIssue {
                            id: photo.id.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
            MatchOutcome::Before => {
                debug!("{}: before tracking", photo.id);
                self.before.push(photo.id.clone());
            }
            MatchOutcome::After => {
                debug!("{}: after tracking", photo.id);
                self.after.push(photo.id.clone());
            }
        }
        self
    }
}

/// Matches every photo against the track, tags the matched ones through `sink`
/// and collects the outcomes.
///
/// A failing sink only affects the photo at hand.
pub fn process<S: TagSink + ?Sized>(
    store: &TrackStore,
    photos: &[PhotoTimestamp],
    max_gap: TimeDelta,
    options: &GeoTagOptions,
    sink: &mut S,
) -> Report {
    photos.iter().fold(Report::default(), |report, photo| {
        let outcome = match_photo(store, photo.timestamp, max_gap);
        report.record(photo, outcome, options, &mut *sink)
    })
}
