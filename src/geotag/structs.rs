use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned EXIF `RATIONAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn value(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Exact decimal text of a rational whose denominator is a power of ten.
    ///
    /// `2097/100` is `20.97`, `5/1` is `5`. Other denominators give `None`.
    pub fn to_decimal_text(&self) -> Option<String> {
        let digits = self.denominator.checked_ilog10()?;
        if 10u32.pow(digits) != self.denominator {
            return None;
        }
        let whole = self.numerator / self.denominator;
        let fraction = self.numerator % self.denominator;
        Some(match digits {
            0 => whole.to_string(),
            _ => format!("{whole}.{fraction:0width$}", width = digits as usize),
        })
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// `GPSLatitudeRef` / `GPSLongitudeRef` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn for_latitude(degrees: f64) -> Self {
        if degrees.is_sign_negative() && degrees != 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    pub fn for_longitude(degrees: f64) -> Self {
        if degrees.is_sign_negative() && degrees != 0.0 {
            Self::West
        } else {
            Self::East
        }
    }

    /// The single-letter reference written to EXIF.
    pub const fn as_exif(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        }
    }

    const fn sign(&self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Degrees, minutes and seconds as three EXIF rationals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dms {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl Dms {
    /// Unsigned decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        self.degrees.value() + self.minutes.value() / 60.0 + self.seconds.value() / 3600.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoAxis {
    pub reference: Hemisphere,
    pub dms: Dms,
}

impl GeoAxis {
    pub fn to_signed_decimal(&self) -> f64 {
        self.reference.sign() * self.dms.to_decimal()
    }
}

/// Everything written into a photo's GPS IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoTag {
    pub latitude: GeoAxis,
    pub longitude: GeoAxis,
    /// `GPSHPositioningError`, in metres.
    pub positioning_error: Rational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoTagOptions {
    pub positioning_error_m: u32,
}

impl Default for GeoTagOptions {
    fn default() -> Self {
        Self {
            positioning_error_m: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_text_of_power_of_ten_rationals() {
        assert_eq!(Rational::new(2097, 100).to_decimal_text().as_deref(), Some("20.97"));
        assert_eq!(Rational::new(7751, 1000).to_decimal_text().as_deref(), Some("7.751"));
        assert_eq!(Rational::new(5, 10).to_decimal_text().as_deref(), Some("0.5"));
        assert_eq!(Rational::new(5, 100).to_decimal_text().as_deref(), Some("0.05"));
        assert_eq!(Rational::new(45, 1).to_decimal_text().as_deref(), Some("45"));
        assert_eq!(Rational::new(1, 3).to_decimal_text(), None);
        assert_eq!(Rational::new(1, 0).to_decimal_text(), None);
    }
}
