use crate::photo::library::{is_tagged, PhotoLibrary};
use crate::photo::structs::{PhotoIssue, PhotoTimestamp};
use crate::utils::list_files_with_extensions;
use log::{debug, warn};
use std::path::{Path, PathBuf};

pub const PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Photos in `dir`, sorted by file name. Files already carrying `tagged_suffix` are skipped.
pub fn discover_photos(dir: &Path, tagged_suffix: &str) -> Result<Vec<PathBuf>, walkdir::Error> {
    let files = list_files_with_extensions(dir, &PHOTO_EXTENSIONS)?;
    Ok(files
        .into_iter()
        .filter(|path| {
            let tagged = is_tagged(path, tagged_suffix);
            if tagged {
                debug!("Skipping already tagged {}", path.display());
            }
            !tagged
        })
        .collect())
}

/// Reads the capture time of every photo, keeping the input order.
///
/// Photos without a readable capture time are returned separately.
pub fn read_photo_timestamps(
    library: &mut dyn PhotoLibrary,
    paths: &[PathBuf],
) -> (Vec<PhotoTimestamp>, Vec<PhotoIssue>) {
    let mut photos = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in paths {
        let id = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        match library.capture_time(path) {
            Ok((timestamp, source)) => photos.push(PhotoTimestamp {
                id,
                path: path.clone(),
                timestamp,
                source,
            }),
            Err(e) => {
                warn!("Cannot read capture time of {id}: {e}");
                unreadable.push(PhotoIssue {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }
    (photos, unreadable)
}
