use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A photo and the wall-clock time it was taken.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoTimestamp {
    /// File name, used to identify the photo in reports.
    pub id: String,
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
    /// Metadata tag (or `FileName`) the timestamp was read from.
    pub source: String,
}

/// A photo that could not be processed, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhotoIssue {
    pub id: String,
    pub reason: String,
}
