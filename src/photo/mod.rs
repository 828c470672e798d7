//! Photo discovery and metadata access.
pub mod capture_time;
pub mod discovery;
pub mod error;
pub mod library;
pub mod structs;
pub use error::PhotoError;
pub use library::{ExifToolLibrary, PhotoLibrary};
pub use structs::{PhotoIssue, PhotoTimestamp};
