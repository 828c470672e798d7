//! Parsing of track and photo timestamps and the camera clock reference.
mod filename_parsing;
pub mod offset;
pub mod parsing;
pub use filename_parsing::parse_datetime_from_filename;
pub use offset::{ReferenceZone, TimeOffset};
