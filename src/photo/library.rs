use crate::geotag::{Dms, GeoTag};
use crate::photo::capture_time::capture_time;
use crate::photo::error::PhotoError;
use chrono::NaiveDateTime;
use exiftool::{ExifTool, ExifToolError};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static RE_SUMMARY: OnceLock<Regex> = OnceLock::new();

/// Access to the metadata of photo files.
///
/// The geotagging pipeline only talks to photos through this trait.
/// [`ExifToolLibrary`] is the implementation backed by the `exiftool` binary.
pub trait PhotoLibrary {
    /// The capture time of `path` and the tag it was read from.
    fn capture_time(&mut self, path: &Path) -> Result<(NaiveDateTime, String), PhotoError>;

    /// Writes `geotag` into the photo's GPS tags, in place.
    fn write_geotag(&mut self, path: &Path, geotag: &GeoTag) -> Result<(), PhotoError>;

    /// Renames a tagged photo so it is recognisable as processed.
    fn mark_tagged(&mut self, path: &Path, suffix: &str) -> Result<PathBuf, PhotoError> {
        let target = tagged_path(path, suffix)
            .ok_or_else(|| PhotoError::InvalidFileName(path.display().to_string()))?;
        fs::rename(path, &target)?;
        Ok(target)
    }
}

pub struct ExifToolLibrary {
    exiftool: ExifTool,
}

impl ExifToolLibrary {
    /// Starts an `exiftool` process, from `exiftool_path` or from the system's PATH.
    pub fn new(exiftool_path: Option<&Path>) -> Result<Self, ExifToolError> {
        let exiftool = match exiftool_path {
            Some(path) => ExifTool::with_executable(path)?,
            None => ExifTool::new()?,
        };
        Ok(Self { exiftool })
    }
}

impl PhotoLibrary for ExifToolLibrary {
    fn capture_time(&mut self, path: &Path) -> Result<(NaiveDateTime, String), PhotoError> {
        let exif = self.exiftool.json(path, &[])?;
        let file_name = file_name(path);
        capture_time(&exif, &file_name)
            .map(|(dt, source)| (dt, source.to_string()))
            .ok_or(PhotoError::MissingCaptureTime(file_name))
    }

    fn write_geotag(&mut self, path: &Path, geotag: &GeoTag) -> Result<(), PhotoError> {
        let mut args = geotag_write_args(geotag);
        args.push("-overwrite_original".to_string());
        args.push(path.to_string_lossy().into_owned());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self.exiftool.execute_lines(&args)?;
        if write_succeeded(&output) {
            Ok(())
        } else {
            Err(PhotoError::WriteRejected {
                file: file_name(path),
                output: output.join("; "),
            })
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Whether exiftool's summary lines report the single file as written.
///
/// `1 image files unchanged` counts as a failure: nothing was stored.
pub fn write_succeeded(lines: &[String]) -> bool {
    let re_summary = RE_SUMMARY
        .get_or_init(|| Regex::new(r"^(\d+) (?:image )?files? (.+)$").unwrap());
    let count = |outcome: &str| {
        lines
            .iter()
            .filter_map(|line| re_summary.captures(line.trim()))
            .filter(|caps| caps[2].starts_with(outcome))
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .sum::<u32>()
    };
    count("updated") == 1 && count("weren't updated") == 0
}

/// exiftool converts `GPSLatitude`/`GPSLongitude` text to its own rationals, so the
/// exact decimal form of each component is what carries the formatted precision.
fn dms_arg(dms: &Dms) -> String {
    [dms.degrees, dms.minutes, dms.seconds]
        .iter()
        .map(|part| {
            part.to_decimal_text()
                .unwrap_or_else(|| part.value().to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `exiftool` assignments that write `geotag`.
pub fn geotag_write_args(geotag: &GeoTag) -> Vec<String> {
    vec![
        format!("-GPSLatitudeRef={}", geotag.latitude.reference.as_exif()),
        format!("-GPSLatitude={}", dms_arg(&geotag.latitude.dms)),
        format!("-GPSLongitudeRef={}", geotag.longitude.reference.as_exif()),
        format!("-GPSLongitude={}", dms_arg(&geotag.longitude.dms)),
        format!("-GPSHPositioningError={}", geotag.positioning_error.value()),
    ]
}

/// `dir/IMG_0001.jpg` with suffix `_gps` becomes `dir/IMG_0001_gps.jpg`.
pub fn tagged_path(path: &Path, suffix: &str) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let name = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    Some(path.with_file_name(name))
}

/// Whether a file name already carries the tagged suffix.
pub fn is_tagged(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(suffix))
}
