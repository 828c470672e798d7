//! Picks the capture time out of a photo's EXIF JSON.

use crate::time::parse_datetime_from_filename;
use crate::time::parsing::parse_naive;
use chrono::NaiveDateTime;
use serde_json::Value;

/// Tags holding the moment the shutter fired, most precise first.
const CAPTURE_TIME_TAGS: [&str; 5] = [
    "SubSecDateTimeOriginal",
    "DateTimeOriginal",
    "SubSecCreateDate",
    "CreateDate",
    "ModifyDate",
];

/// The capture time and the tag it came from.
pub fn capture_time_from_exif(exif: &Value) -> Option<(NaiveDateTime, &'static str)> {
    CAPTURE_TIME_TAGS.iter().find_map(|&tag| {
        exif.get(tag)
            .and_then(Value::as_str)
            .and_then(parse_naive)
            .map(|dt| (dt, tag))
    })
}

/// Falls back to the file name when EXIF has no usable date.
pub fn capture_time(exif: &Value, file_name: &str) -> Option<(NaiveDateTime, &'static str)> {
    capture_time_from_exif(exif)
        .or_else(|| parse_datetime_from_filename(file_name).map(|dt| (dt, "FileName")))
}
