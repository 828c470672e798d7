use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

/// Case-insensitive extension check, `extensions` given without the dot.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Lists the files directly inside `dir` whose extension is one of `extensions`.
///
/// Hidden files are skipped, subdirectories are not descended into and the result
/// is sorted by file name. I/O errors encountered while reading `dir` are propagated.
pub fn list_files_with_extensions(
    dir: &Path,
    extensions: &[&str],
) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        // The root itself may be "." and must not be mistaken for a hidden entry.
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => (entry.file_type().is_file() && has_extension(entry.path(), extensions))
                .then(|| Ok(entry.into_path())),
            Err(e) => Some(Err(e)),
        })
        .collect()
}
