//! Temporal nearest-neighbour matching of photos against a track.
pub mod batch;
pub mod logic;
pub use batch::{process, Report, TagSink};
pub use logic::{match_photo, MatchOutcome};
