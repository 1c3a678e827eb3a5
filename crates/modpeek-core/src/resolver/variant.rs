//! File variant probing.

use super::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Every variant of `candidate` worth probing, in order.
///
/// The bare candidate comes first, followed by `candidate + ext` for each
/// extension the candidate does not already end with.
#[must_use]
pub fn file_variants(candidate: &str, extensions: &[String]) -> Vec<String> {
    let mut variants = vec![candidate.to_string()];
    variants.extend(
        extensions
            .iter()
            .filter(|ext| !candidate.ends_with(ext.as_str()))
            .map(|ext| format!("{candidate}{ext}")),
    );
    variants
}

/// Return the first variant of `candidate` that exists as a regular file.
#[must_use]
pub fn resolve_js_file_path(
    fs: &dyn FileSystem,
    candidate: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    probe_variants(fs, candidate, extensions, |_| {})
}

/// Like [`resolve_js_file_path`], reporting each probed path to `on_probe`.
pub(crate) fn probe_variants(
    fs: &dyn FileSystem,
    candidate: &str,
    extensions: &[String],
    mut on_probe: impl FnMut(&Path),
) -> Option<PathBuf> {
    for variant in file_variants(candidate, extensions) {
        let path = PathBuf::from(variant);
        on_probe(&path);
        if fs.is_file(&path) {
            return Some(path);
        }
    }
    None
}
