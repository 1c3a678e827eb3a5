use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collect every regular file under `root`, skipping any directory named `excluded_dir`.
///
/// Entries are visited in file-name order so the result is deterministic.
/// Unreadable entries are skipped rather than aborting the walk.
#[must_use]
pub fn walk_files_excluding(root: &Path, excluded_dir: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, excluded_dir))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn is_excluded_dir(entry: &DirEntry, excluded_dir: &str) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name() == OsStr::new(excluded_dir)
}
