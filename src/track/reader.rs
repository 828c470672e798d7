//! Discovery of GPX track logs and extraction of their raw track points.

use crate::GeotagError;
use crate::track::error::TrackError;
use crate::track::structs::RawTrackRecord;
use crate::utils::list_files_with_extensions;
use log::{debug, info, warn};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const TRACK_EXTENSIONS: [&str; 1] = ["gpx"];

static RE_TRKPT: OnceLock<Regex> = OnceLock::new();
static RE_LAT: OnceLock<Regex> = OnceLock::new();
static RE_LON: OnceLock<Regex> = OnceLock::new();
static RE_TIME: OnceLock<Regex> = OnceLock::new();

/// Lists the track logs in `dir`, failing with [`TrackError::NoTrackFiles`] if there are none.
pub fn discover_track_files(dir: &Path) -> Result<Vec<PathBuf>, GeotagError> {
    let files = list_files_with_extensions(dir, &TRACK_EXTENSIONS)?;
    if files.is_empty() {
        return Err(TrackError::NoTrackFiles(dir.to_path_buf()).into());
    }
    info!("{} track file(s) found in {}", files.len(), dir.display());
    Ok(files)
}

/// Extracts every `<trkpt>` of a GPX document.
///
/// Attributes may come in any order. A point without a `<time>` child is still
/// returned (with an empty time) so that it is counted as malformed downstream.
pub fn extract_records(gpx_text: &str, file: &str) -> Vec<RawTrackRecord> {
    let re_trkpt =
        RE_TRKPT.get_or_init(|| Regex::new(r"(?s)<trkpt\b([^>/]*)>(.*?)</trkpt>").unwrap());
    let re_lat = RE_LAT.get_or_init(|| Regex::new(r#"\blat\s*=\s*["']([^"']*)["']"#).unwrap());
    let re_lon = RE_LON.get_or_init(|| Regex::new(r#"\blon\s*=\s*["']([^"']*)["']"#).unwrap());
    let re_time = RE_TIME.get_or_init(|| Regex::new(r"(?s)<time>(.*?)</time>").unwrap());

    let capture = |re: &Regex, text: &str| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    re_trkpt
        .captures_iter(gpx_text)
        .map(|caps| {
            let attributes = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            RawTrackRecord {
                latitude: capture(re_lat, attributes),
                longitude: capture(re_lon, attributes),
                time: capture(re_time, body),
                file: file.to_string(),
            }
        })
        .collect()
}

/// Raw records of a set of track logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRecords {
    /// Records of every readable log, in file order.
    pub records: Vec<RawTrackRecord>,
    /// File names of the logs that could not be read.
    pub unreadable: Vec<String>,
}

/// Reads all raw track records of the given files, in file order.
///
/// Text that is not valid UTF-8 is decoded lossily: only the ASCII coordinates and
/// times matter. A file that cannot be read at all is skipped and listed.
pub fn read_track_records(files: &[PathBuf]) -> TrackRecords {
    files
        .iter()
        .fold(TrackRecords::default(), |mut acc, path| {
            let file = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            match fs::read(path) {
                Ok(bytes) => {
                    let extracted = extract_records(&String::from_utf8_lossy(&bytes), &file);
                    debug!("{file}: {} track points", extracted.len());
                    acc.records.extend(extracted);
                }
                Err(e) => {
                    warn!("Skipping unreadable track file {}: {e}", path.display());
                    acc.unreadable.push(file);
                }
            }
            acc
        })
}
