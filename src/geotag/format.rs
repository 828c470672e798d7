//! Decimal degrees to the rational degrees/minutes/seconds form of EXIF GPS tags.

use crate::geotag::structs::{Dms, GeoAxis, GeoTag, GeoTagOptions, Hemisphere, Rational};

/// Digits of the seconds value kept in the numerator, integer digits included.
const SECONDS_DIGITS: usize = 4;

pub fn format_geotag(latitude: f64, longitude: f64, options: &GeoTagOptions) -> GeoTag {
    GeoTag {
        latitude: GeoAxis {
            reference: Hemisphere::for_latitude(latitude),
            dms: decimal_to_dms(latitude),
        },
        longitude: GeoAxis {
            reference: Hemisphere::for_longitude(longitude),
            dms: decimal_to_dms(longitude),
        },
        positioning_error: Rational::new(options.positioning_error_m, 1),
    }
}

/// Splits `|value|` into whole degrees, whole minutes and rational seconds.
pub fn decimal_to_dms(value: f64) -> Dms {
    let total_seconds = value.abs() * 3600.0;
    let seconds = total_seconds % 60.0;
    // The quotient of an exact remainder is integral up to rounding noise.
    let total_minutes = ((total_seconds - seconds) / 60.0).round();
    let degrees = (total_minutes / 60.0).floor();
    let minutes = total_minutes - degrees * 60.0;

    Dms {
        degrees: Rational::new(degrees as u32, 1),
        minutes: Rational::new(minutes as u32, 1),
        seconds: seconds_to_rational(seconds),
    }
}

/// Truncates `seconds` to its first [`SECONDS_DIGITS`] decimal digits.
///
/// Works on the shortest round-trip representation of the float, so `20.9736`
/// becomes `2097/100` and not `2096/100`. Short values keep what they have:
/// `5` is `5/1`, `0.5` is `5/10`.
fn seconds_to_rational(seconds: f64) -> Rational {
    let text = format!("{seconds}");
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction_digits = SECONDS_DIGITS.saturating_sub(whole.len()).min(fraction.len());
    let numerator = format!("{whole}{}", &fraction[..fraction_digits])
        .parse()
        .unwrap_or(0);
    Rational::new(numerator, 10u32.pow(fraction_digits as u32))
}
