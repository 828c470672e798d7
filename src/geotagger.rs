use crate::GeotagError;
use crate::geotag::{GeoTag, GeoTagOptions};
use crate::matching::{process, Report, TagSink};
use crate::photo::discovery::{discover_photos, read_photo_timestamps};
use crate::photo::{ExifToolLibrary, PhotoError, PhotoIssue, PhotoLibrary, PhotoTimestamp};
use crate::time::TimeOffset;
use crate::track::reader::{discover_track_files, read_track_records, TrackRecords};
use crate::track::{TrackError, TrackStore};
use bon::bon;
use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Tunables of a geotagging run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeotagSettings {
    /// Largest time difference between a photo and its nearest track point that still matches.
    pub max_gap: TimeDelta,
    pub time_offset: TimeOffset,
    pub geotag: GeoTagOptions,
    /// Inserted before the extension of every tagged photo.
    pub tagged_suffix: String,
    /// Match and report, but leave the photos untouched.
    pub dry_run: bool,
}

impl Default for GeotagSettings {
    fn default() -> Self {
        Self {
            max_gap: TimeDelta::minutes(15),
            time_offset: TimeOffset::default(),
            geotag: GeoTagOptions::default(),
            tagged_suffix: "_gps".to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub files: usize,
    pub records: usize,
    pub malformed: usize,
    pub duplicates_removed: usize,
    pub points: usize,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
    /// The camera clock zone track times were converted into.
    pub zone: String,
    /// Track logs skipped because they could not be read.
    pub unreadable_files: Vec<String>,
}

impl TrackSummary {
    fn new(store: &TrackStore, files: usize, read: TrackRecords) -> Self {
        Self {
            files,
            records: read.records.len(),
            malformed: store.malformed(),
            duplicates_removed: store.duplicates_removed(),
            points: store.len(),
            first: store.first().timestamp,
            last: store.last().timestamp,
            zone: store.zone().to_string(),
            unreadable_files: read.unreadable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSummary {
    pub found: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Photos skipped because their capture time could not be read.
    pub unreadable: Vec<PhotoIssue>,
}

impl PhotoSummary {
    pub fn readable(&self) -> usize {
        self.found - self.unreadable.len()
    }
}

/// How far a run got.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RunOutcome {
    NoTrackFiles {
        dir: PathBuf,
    },
    #[serde(rename_all = "camelCase")]
    NoTrackPoints {
        track_files: usize,
        unreadable_files: usize,
        malformed: usize,
    },
    NoPhotos {
        track: TrackSummary,
    },
    Completed {
        track: TrackSummary,
        photos: PhotoSummary,
        report: Report,
    },
}

impl RunOutcome {
    /// The batch report, if the run got as far as matching.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Completed { report, .. } => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub dry_run: bool,
    pub elapsed_seconds: f64,
}

/// Writes geotags through a [`PhotoLibrary`] and renames the photo afterwards.
struct LibrarySink<'l, 's> {
    library: &'l mut dyn PhotoLibrary,
    tagged_suffix: &'s str,
    dry_run: bool,
}

impl TagSink for LibrarySink<'_, '_> {
    fn apply(&mut self, photo: &PhotoTimestamp, geotag: &GeoTag) -> Result<(), PhotoError> {
        if self.dry_run {
            debug!("{}: dry run, not writing", photo.id);
            return Ok(());
        }
        self.library.write_geotag(&photo.path, geotag)?;
        let renamed = self.library.mark_tagged(&photo.path, self.tagged_suffix)?;
        debug!("{} renamed to {}", photo.id, renamed.display());
        Ok(())
    }
}

/// Runs the whole pipeline: load the track, read the photos, match, tag.
///
/// Missing track logs or photos end the run early with a matching [`RunOutcome`];
/// only a missing folder or I/O failures on the folders themselves are errors.
pub fn run_pipeline(
    library: &mut dyn PhotoLibrary,
    settings: &GeotagSettings,
    photo_dir: &Path,
    track_dir: &Path,
) -> Result<RunOutcome, GeotagError> {
    for dir in [photo_dir, track_dir] {
        if !dir.is_dir() {
            return Err(GeotagError::NotAFolder(dir.to_path_buf()));
        }
    }
    let track_files = match discover_track_files(track_dir) {
        Ok(files) => files,
        Err(GeotagError::Track(TrackError::NoTrackFiles(dir))) => {
            info!("No track files found in {}", dir.display());
            return Ok(RunOutcome::NoTrackFiles { dir });
        }
        Err(e) => return Err(e),
    };
    let read = read_track_records(&track_files);
    let no_points = |malformed| RunOutcome::NoTrackPoints {
        track_files: track_files.len(),
        unreadable_files: read.unreadable.len(),
        malformed,
    };
    let store = match TrackStore::build(&read.records, settings.time_offset) {
        Ok(store) => store,
        Err(TrackError::EmptyInput) => return Ok(no_points(0)),
        Err(TrackError::NoValidPoints { malformed }) => return Ok(no_points(malformed)),
        Err(e) => return Err(e.into()),
    };
    let track = TrackSummary::new(&store, track_files.len(), read);
    info!(
        "Loaded {} track points ({} duplicates, {} malformed) from {} to {}",
        track.points, track.duplicates_removed, track.malformed, track.first, track.last
    );

    let paths = discover_photos(photo_dir, &settings.tagged_suffix)?;
    if paths.is_empty() {
        info!("No photos found in {}", photo_dir.display());
        return Ok(RunOutcome::NoPhotos { track });
    }
    let (photos, unreadable) = read_photo_timestamps(library, &paths);
    let photo_summary = PhotoSummary {
        found: paths.len(),
        first: photos.iter().map(|p| p.timestamp).min(),
        last: photos.iter().map(|p| p.timestamp).max(),
        unreadable,
    };
    info!(
        "Read capture times of {} of {} photos",
        photos.len(),
        paths.len()
    );

    let mut sink = LibrarySink {
        library,
        tagged_suffix: &settings.tagged_suffix,
        dry_run: settings.dry_run,
    };
    let report = process(
        &store,
        &photos,
        settings.max_gap,
        &settings.geotag,
        &mut sink,
    );
    info!(
        "{} matched, {} before, {} after, {} failed",
        report.matched_count(),
        report.before.len(),
        report.after.len(),
        report.failed.len()
    );

    Ok(RunOutcome::Completed {
        track,
        photos: photo_summary,
        report,
    })
}

/// The main entry point for geotagging a folder of photos.
///
/// Use the builder pattern to construct an instance:
/// ```rust,no_run
/// # use track_geotagger::{Geotagger, GeotagError};
/// # use std::path::Path;
/// # fn main() -> Result<(), GeotagError> {
/// let mut geotagger = Geotagger::builder()
///     .max_gap(chrono::TimeDelta::minutes(10))
///     .build()?;
/// let summary = geotagger.run(Path::new("photos"), Path::new("tracks"))?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub struct Geotagger {
    library: Box<dyn PhotoLibrary>,
    settings: GeotagSettings,
}

#[bon]
impl Geotagger {
    /// Constructs a `Geotagger` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `exiftool_path: Option<PathBuf>` - A specific `exiftool` executable. If `None`, `exiftool` is searched for in the system's PATH.
    /// * `library: Option<Box<dyn PhotoLibrary>>` - Replaces `exiftool` as the way photo metadata is read and written.
    /// * `max_gap: TimeDelta` - (Default: 15 minutes) The tolerance window around each track point.
    /// * `time_offset: TimeOffset` - (Default: `Auto`) How the camera clock relates to UTC.
    /// * `positioning_error_m: u32` - (Default: `5`) Written to `GPSHPositioningError`.
    /// * `tagged_suffix: String` - (Default: `"_gps"`) Appended to the name of tagged photos.
    /// * `dry_run: bool` - (Default: `false`) Report matches without touching any file.
    ///
    /// # Errors
    ///
    /// Fails if no `library` is given and `exiftool` cannot be started.
    #[builder]
    pub fn new(
        exiftool_path: Option<PathBuf>,
        library: Option<Box<dyn PhotoLibrary>>,
        #[builder(default = TimeDelta::minutes(15))] max_gap: TimeDelta,
        #[builder(default)] time_offset: TimeOffset,
        #[builder(default = 5)] positioning_error_m: u32,
        #[builder(default = String::from("_gps"))] tagged_suffix: String,
        #[builder(default)] dry_run: bool,
    ) -> Result<Self, GeotagError> {
        let library = match library {
            Some(library) => library,
            None => Box::new(ExifToolLibrary::new(exiftool_path.as_deref())?),
        };
        Ok(Self {
            library,
            settings: GeotagSettings {
                max_gap,
                time_offset,
                geotag: GeoTagOptions {
                    positioning_error_m,
                },
                tagged_suffix,
                dry_run,
            },
        })
    }

    pub fn settings(&self) -> &GeotagSettings {
        &self.settings
    }

    /// Geotags the photos in `photo_dir` using the track logs in `track_dir`.
    pub fn run(&mut self, photo_dir: &Path, track_dir: &Path) -> Result<RunSummary, GeotagError> {
        let started = Instant::now();
        let outcome = run_pipeline(self.library.as_mut(), &self.settings, photo_dir, track_dir)?;
        Ok(RunSummary {
            outcome,
            dry_run: self.settings.dry_run,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }
}
