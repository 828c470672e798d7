//! Conversion of track-log UTC times into the photos' wall-clock reference.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use log::warn;
use std::fmt;
use std::str::FromStr;
use tzf_rs::DefaultFinder;

static FINDER: std::sync::LazyLock<DefaultFinder> = std::sync::LazyLock::new(DefaultFinder::new);

/// How the camera clock relates to UTC.
///
/// Cameras record wall-clock time without a zone, track loggers record UTC. Every
/// track point is shifted into camera time once, when it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOffset {
    /// The camera clock runs at a constant offset from UTC.
    Fixed(FixedOffset),
    /// The camera clock was set in this IANA zone.
    Zone(Tz),
    /// Look the zone up from where the track was recorded.
    #[default]
    Auto,
}

/// The single offset a whole track is converted with.
///
/// A camera clock is not adjusted when daylight saving ends in the middle of a
/// trip, so a zone is pinned to the offset it had when tracking started. One
/// constant offset keeps distinct fixes distinct and in UTC order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone {
    offset: FixedOffset,
    zone: Option<Tz>,
}

impl TimeOffset {
    /// Resolves to the offset in effect at `at`, looking `Auto` up from
    /// `(latitude, longitude)`.
    ///
    /// `Auto` falls back to UTC when the location has no zone (open sea).
    pub fn resolve(self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> ReferenceZone {
        match self {
            Self::Fixed(offset) => ReferenceZone::fixed(offset),
            Self::Zone(tz) => ReferenceZone::pinned(tz, at),
            Self::Auto => {
                let tz_name = FINDER.get_tz_name(longitude, latitude);
                match Tz::from_str(tz_name) {
                    Ok(tz) => ReferenceZone::pinned(tz, at),
                    Err(_) => {
                        warn!(
                            "No timezone found at {latitude}, {longitude}, treating camera time as UTC"
                        );
                        ReferenceZone::utc()
                    }
                }
            }
        }
    }
}

impl ReferenceZone {
    pub fn fixed(offset: FixedOffset) -> Self {
        Self { offset, zone: None }
    }

    /// `tz` with the offset it has at `at`.
    pub fn pinned(tz: Tz, at: DateTime<Utc>) -> Self {
        Self {
            offset: tz.offset_from_utc_datetime(&at.naive_utc()).fix(),
            zone: Some(tz),
        }
    }

    pub fn utc() -> Self {
        Self::fixed(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The named zone the offset was taken from, if any.
    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    /// The wall-clock time a camera on this offset would show at `utc`.
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.offset).naive_local()
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.zone {
            Some(tz) => write!(f, "{} {}", tz.name(), self.offset),
            None => write!(f, "{}", self.offset),
        }
    }
}
