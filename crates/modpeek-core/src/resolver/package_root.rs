//! Bounded upward directory walks.

use super::fs::FileSystem;
use crate::config::ResolverConfig;
use std::path::{Path, PathBuf};

/// `dir` and its ancestors, nearest first, stopping before the filesystem
/// root and after `max_hops` directories.
pub fn bounded_ancestors(dir: &Path, max_hops: usize) -> impl Iterator<Item = &Path> {
    dir.ancestors()
        .take_while(|d| d.parent().is_some())
        .take(max_hops)
}

/// Find the nearest directory (starting at `dir` itself) holding a package manifest.
#[must_use]
pub fn find_package_root(
    fs: &dyn FileSystem,
    dir: &Path,
    config: &ResolverConfig,
) -> Option<PathBuf> {
    bounded_ancestors(dir, config.max_ancestor_hops)
        .find(|d| fs.is_file(&d.join(&config.manifest_file)))
        .map(Path::to_path_buf)
}

/// Find the nearest installed-dependency directory above `dir`.
///
/// Returns the directory itself (e.g. `/proj/node_modules`), not its parent.
#[must_use]
pub fn find_node_modules(
    fs: &dyn FileSystem,
    dir: &Path,
    config: &ResolverConfig,
) -> Option<PathBuf> {
    bounded_ancestors(dir, config.max_ancestor_hops)
        .map(|d| d.join(&config.modules_dir))
        .find(|candidate| fs.is_dir(candidate))
}
