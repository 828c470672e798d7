//! # Track Geotagger
//!
//! Stamp photos with the position recorded by a GPS logger at the time they were taken.
//!
//! This crate reads GPX track logs, converts every track point into the camera's
//! local time, and writes the nearest-in-time position into the EXIF GPS tags of
//! each photo that falls within a configurable tolerance window.
//!
//! ## Key Features
//!
//! - **Track Loading**: Extracts `<trkpt>` records from every `.gpx` file in a folder, skipping malformed points and collapsing duplicate timestamps.
//! - **Time Alignment**: Converts UTC track times to camera time with a fixed offset, a named IANA zone, or a zone looked up from the track's own coordinates.
//! - **Matching**: Binary search for the nearest track point, classifying unmatched photos as taken before or after tracking.
//! - **EXIF Writing**: Formats positions as degree/minute/second rationals and writes them with `exiftool`, renaming tagged files.
//! - **Reporting**: A console summary of the run, or the same summary as JSON.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use track_geotagger::{Geotagger, TimeOffset};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut geotagger = Geotagger::builder()
//!         .time_offset(TimeOffset::Auto)
//!         .dry_run(true)
//!         .build()?;
//!
//!     let summary = geotagger.run(Path::new("photos/ural"), Path::new("tracks/ural"))?;
//!     println!("{summary}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod geotag;
pub mod geotagger;
pub mod matching;
pub mod photo;
pub mod report;
pub mod time;
pub mod track;
pub mod utils;

pub use error::GeotagError;
pub use geotag::{GeoTag, GeoTagOptions};
pub use geotagger::{run_pipeline, GeotagSettings, Geotagger, RunOutcome, RunSummary};
pub use matching::{MatchOutcome, Report};
pub use photo::{ExifToolLibrary, PhotoLibrary};
pub use time::TimeOffset;
pub use track::{TrackPoint, TrackStore};
