use crate::time::parsing::parse_track_time;
use crate::time::ReferenceZone;
use crate::track::error::TrackError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One `<trkpt>` as extracted from a track log, nothing parsed yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrackRecord {
    pub latitude: String,
    pub longitude: String,
    pub time: String,
    /// File name of the track log the record came from.
    pub file: String,
}

/// A coordinate kept as the exact decimal text of the log, alongside its value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub text: String,
    pub degrees: f64,
}

impl Coordinate {
    /// Parses signed decimal degrees, rejecting values outside `[-limit, limit]`.
    pub fn parse(text: &str, limit: f64) -> Option<Self> {
        let text = text.trim();
        let degrees = text.parse::<f64>().ok()?;
        (degrees.is_finite() && degrees.abs() <= limit).then(|| Self {
            text: text.to_string(),
            degrees,
        })
    }

    pub fn latitude(text: &str) -> Option<Self> {
        Self::parse(text, 90.0)
    }

    pub fn longitude(text: &str) -> Option<Self> {
        Self::parse(text, 180.0)
    }
}

/// A parsed track record, its time still in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFix {
    pub utc: DateTime<Utc>,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl TrackFix {
    pub fn from_raw(raw: &RawTrackRecord) -> Result<Self, TrackError> {
        let malformed = |reason: String| TrackError::Malformed {
            file: raw.file.clone(),
            reason,
        };
        let latitude = Coordinate::latitude(&raw.latitude)
            .ok_or_else(|| malformed(format!("invalid latitude {:?}", raw.latitude)))?;
        let longitude = Coordinate::longitude(&raw.longitude)
            .ok_or_else(|| malformed(format!("invalid longitude {:?}", raw.longitude)))?;
        let utc = parse_track_time(&raw.time)
            .ok_or_else(|| malformed(format!("invalid time {:?}", raw.time)))?;
        Ok(Self {
            utc,
            latitude,
            longitude,
        })
    }

    /// The fix in camera wall-clock time.
    pub fn into_point(self, zone: &ReferenceZone) -> TrackPoint {
        TrackPoint {
            timestamp: zone.to_local(self.utc),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A GPS fix, with its timestamp already expressed in camera wall-clock time.
///
/// Two points with the same timestamp describe the same fix; the coordinates take no
/// part in identity or ordering. Use [`TrackPoint::time_key`] wherever points are sorted
/// or deduplicated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPoint {
    pub timestamp: NaiveDateTime,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl TrackPoint {
    pub fn from_raw(raw: &RawTrackRecord, zone: &ReferenceZone) -> Result<Self, TrackError> {
        TrackFix::from_raw(raw).map(|fix| fix.into_point(zone))
    }

    /// Identity and sort key of a track point.
    pub fn time_key(&self) -> NaiveDateTime {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Timelike};

    fn raw(lat: &str, lon: &str, time: &str) -> RawTrackRecord {
        RawTrackRecord {
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            time: time.to_string(),
            file: "test.gpx".to_string(),
        }
    }

    #[test]
    fn test_from_raw_applies_reference_zone() {
        let zone = ReferenceZone::fixed(FixedOffset::east_opt(3 * 3600).unwrap());
        let point =
            TrackPoint::from_raw(&raw("55.755826", "37.6173", "2021-07-10T07:00:00Z"), &zone)
                .unwrap();

        assert_eq!(
            point.timestamp,
            NaiveDate::from_ymd_opt(2021, 7, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(point.latitude.text, "55.755826");
        assert_eq!(point.latitude.degrees, 55.755826);
        assert_eq!(point.longitude.degrees, 37.6173);
    }

    #[test]
    fn test_from_raw_keeps_negative_coordinates() {
        let point = TrackPoint::from_raw(
            &raw("-33.8688", "-70.6693", "2021-07-10T07:00:00.750Z"),
            &ReferenceZone::utc(),
        )
        .unwrap();
        assert_eq!(point.latitude.degrees, -33.8688);
        assert_eq!(point.longitude.degrees, -70.6693);
        assert_eq!(point.timestamp.nanosecond(), 750_000_000);
    }

    #[test]
    fn test_from_raw_reports_what_is_wrong() {
        let zone = ReferenceZone::utc();
        let bad_time = TrackPoint::from_raw(&raw("1.0", "2.0", "noon"), &zone).unwrap_err();
        assert!(
            matches!(&bad_time, TrackError::Malformed { file, reason } if file == "test.gpx" && reason.contains("time"))
        );

        let bad_lat = TrackPoint::from_raw(&raw("91.0", "2.0", "2021-07-10T07:00:00Z"), &zone);
        assert!(matches!(bad_lat, Err(TrackError::Malformed { reason, .. }) if reason.contains("latitude")));

        let bad_lon = TrackPoint::from_raw(&raw("1.0", "east", "2021-07-10T07:00:00Z"), &zone);
        assert!(matches!(bad_lon, Err(TrackError::Malformed { reason, .. }) if reason.contains("longitude")));
    }

    #[test]
    fn test_coordinate_rejects_non_finite() {
        assert!(Coordinate::latitude("NaN").is_none());
        assert!(Coordinate::longitude("inf").is_none());
        assert!(Coordinate::longitude("-180.0").is_some());
    }
}
