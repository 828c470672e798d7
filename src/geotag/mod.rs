//! Conversion of matched coordinates into EXIF GPS tag values.
pub mod format;
pub mod structs;
pub use format::format_geotag;
pub use structs::{Dms, GeoAxis, GeoTag, GeoTagOptions, Hemisphere, Rational};
