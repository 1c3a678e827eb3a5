//! Module resolver for editor previews.
//!
//! Resolves a specifier to the single most likely target file: relative and
//! absolute specifiers by path join and variant probing, bare specifiers via
//! the nearest `node_modules` directory and the package's `main` field.

pub mod fs;
mod manifest;
mod module;
mod package_root;
pub mod trace;
mod variant;

pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use manifest::{read_manifest, Manifest};
pub use module::{
    resolve_specifier, resolve_with_trace, ResolveContext, ResolveReasonCode, ResolveResult,
    ResolveResultWithTrace, ResolveStatus,
};
pub use package_root::{bounded_ancestors, find_node_modules, find_package_root};
pub use trace::{
    steps as trace_steps, warning_codes as trace_warning_codes, ResolveTrace, ResolveTraceStep,
    TraceWarning,
};
pub use variant::{file_variants, resolve_js_file_path};
