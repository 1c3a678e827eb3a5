//! Filesystem accessor seam.
//!
//! Resolution only ever touches the disk through [`FileSystem`], so the
//! algorithms can run against [`MemoryFileSystem`] in tests and in hosts that
//! keep unsaved buffers in memory.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

/// Blocking filesystem operations used by the resolver.
pub trait FileSystem: std::fmt::Debug {
    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// All regular files under `root`, in path order, never descending into
    /// a directory named `excluded_dir`.
    fn walk_files(&self, root: &Path, excluded_dir: &str) -> Vec<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        modpeek_util::fs::read_to_string_lossy(path)
    }

    fn walk_files(&self, root: &Path, excluded_dir: &str) -> Vec<PathBuf> {
        modpeek_util::fs::walk_files_excluding(root, excluded_dir)
    }
}

/// In-memory filesystem. Directories are implied by the files beneath them
/// and may also be declared explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder form).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Add an empty directory (builder form).
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Add or replace a file.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|d| d.starts_with(path))
            || self
                .files
                .keys()
                .any(|f| f != path && f.starts_with(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn walk_files(&self, root: &Path, excluded_dir: &str) -> Vec<PathBuf> {
        self.files
            .keys()
            .filter(|f| {
                let Ok(rel) = f.strip_prefix(root) else {
                    return false;
                };
                // The file name itself is not a directory; only test its parents.
                let mut parents = rel.components().collect::<Vec<_>>();
                parents.pop();
                !parents
                    .iter()
                    .any(|c| c.as_os_str() == OsStr::new(excluded_dir))
            })
            .cloned()
            .collect()
    }
}
