pub mod complete;
pub mod hover;
pub mod resolve;
pub mod version;

use miette::{IntoDiagnostic, Result, WrapErr};
use modpeek_core::BufferView;
use std::path::{Path, PathBuf};

/// Make `path` absolute against `cwd`, resolving symlinks when it exists.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    dunce::canonicalize(&joined).unwrap_or(joined)
}

/// Load a source file into an editor view, as a host editor would.
pub fn open_view(cwd: &Path, file: &Path) -> Result<BufferView> {
    let path = absolutize(cwd, file);
    let text = modpeek_util::fs::read_to_string_lossy(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    Ok(BufferView::new(Some(path), text))
}
