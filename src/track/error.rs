use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TrackError {
    #[error("No track files found in {0}")]
    NoTrackFiles(PathBuf),

    #[error("Track files were found but contain no points")]
    EmptyInput,

    #[error("None of the {malformed} track points could be parsed")]
    NoValidPoints { malformed: usize },

    #[error("Malformed track point in {file}: {reason}")]
    Malformed { file: String, reason: String },
}
