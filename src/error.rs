use thiserror::Error;

/// The primary error type for the track-geotagger crate.
#[derive(Error, Debug)]
pub enum GeotagError {
    #[error("Exiftool failed to start or execute")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is not a folder", .0.display())]
    NotAFolder(std::path::PathBuf),

    #[error("Cannot list directory: {0}")]
    Walk(#[from] walkdir::Error),

    // --- Custom Module Errors ---
    #[error("Track loading failed: {0}")]
    Track(#[from] crate::track::TrackError),

    #[error("Photo processing failed: {0}")]
    Photo(#[from] crate::photo::PhotoError),
}
