//! Track logs: reading raw points and the time-sorted point store.
pub mod error;
pub mod reader;
pub mod store;
pub mod structs;
pub use error::TrackError;
pub use store::TrackStore;
pub use structs::{Coordinate, RawTrackRecord, TrackFix, TrackPoint};
