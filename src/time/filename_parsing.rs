use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

static RE_YYYYMMDD_HHMMSS: OnceLock<Regex> = OnceLock::new();
static RE_YYYY_MM_DD_HH_MM_SS: OnceLock<Regex> = OnceLock::new();

/// Recovers a capture time encoded in a photo's file name.
///
/// Used when the photo carries no usable EXIF date. The result is wall-clock time,
/// the same reference the camera writes into `DateTimeOriginal`.
pub fn parse_datetime_from_filename(filename: &str) -> Option<NaiveDateTime> {
    // --- Attempt 1: Standard YYYYMMDD_HHMMSS format ---
    let re1 = RE_YYYYMMDD_HHMMSS.get_or_init(|| Regex::new(r"(\d{8})_(\d{6})").unwrap());
    if let Some(caps) = re1.captures(filename) {
        let datetime_str = format!("{}{}", &caps[1], &caps[2]);
        if let Ok(dt) = NaiveDateTime::parse_from_str(&datetime_str, "%Y%m%d%H%M%S") {
            return Some(dt);
        }
    }

    // --- Attempt 2: Hyphenated YYYY-MM-DD_HH-MM-SS format ---
    let re2 = RE_YYYY_MM_DD_HH_MM_SS
        .get_or_init(|| Regex::new(r"(\d{4}-\d{2}-\d{2})_(\d{2}-\d{2}-\d{2})").unwrap());
    if let Some(caps) = re2.captures(filename) {
        let datetime_str = format!("{} {}", &caps[1], &caps[2]);
        if let Ok(dt) = NaiveDateTime::parse_from_str(&datetime_str, "%Y-%m-%d %H-%M-%S") {
            return Some(dt);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_pixel_style_name() {
        let dt = parse_datetime_from_filename("PXL_20210710_123113.jpg");
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2021, 7, 10)
                .unwrap()
                .and_hms_opt(12, 31, 13)
        );
    }

    #[test]
    fn test_hyphenated_name() {
        let dt = parse_datetime_from_filename("photo_2021-07-10_12-31-13.JPG");
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2021, 7, 10)
                .unwrap()
                .and_hms_opt(12, 31, 13)
        );
    }

    #[test]
    fn test_time_only_name_is_not_enough() {
        // Camera counters with a time but no date cannot be placed on the track.
        assert_eq!(parse_datetime_from_filename("IMG_1116_11-31-13.JPG"), None);
    }

    #[test]
    fn test_invalid_date_digits() {
        assert_eq!(parse_datetime_from_filename("IMG_20219999_999999.jpg"), None);
    }
}
