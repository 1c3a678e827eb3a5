//! Module path resolution.
//!
//! Supports:
//! - Relative specifiers: joined onto the importing directory, cleaned, variant-probed
//! - Absolute specifiers: cleaned, variant-probed
//! - Bare specifiers: the first ancestor `node_modules` directory, then the
//!   package manifest's `main` entry point
//!
//! Only the nearest `node_modules` directory is consulted, even when the
//! package is missing from it.

use super::fs::FileSystem;
use super::manifest::read_manifest;
use super::package_root::find_node_modules;
use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use super::variant::probe_variants;
use crate::config::ResolverConfig;
use crate::error::Error;
use crate::imports::{Specifier, SpecifierKind};
use crate::paths::{clean_path, has_unresolved_parent, join_path};
use std::path::{Path, PathBuf};

/// Maximum number of tried paths to record.
const MAX_TRIED_PATHS: usize = 20;

/// Context for resolution.
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    /// Directory containing the importing file.
    pub parent: PathBuf,
    /// Resolver configuration.
    pub config: &'a ResolverConfig,
    /// Filesystem accessor.
    pub fs: &'a dyn FileSystem,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        config: &'a ResolverConfig,
        parent: impl Into<PathBuf>,
    ) -> Self {
        Self {
            parent: parent.into(),
            config,
            fs,
        }
    }

    /// Context for resolving imports written in `file`.
    ///
    /// Returns `None` when the file has no parent directory.
    #[must_use]
    pub fn for_file(
        fs: &'a dyn FileSystem,
        config: &'a ResolverConfig,
        file: &Path,
    ) -> Option<Self> {
        let parent = file.parent().filter(|p| !p.as_os_str().is_empty())?;
        Some(Self::new(fs, config, parent))
    }
}

/// Resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    Resolved,
    Unresolved,
}

impl std::fmt::Display for ResolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved => f.write_str("resolved"),
            Self::Unresolved => f.write_str("unresolved"),
        }
    }
}

/// Reason codes for unresolved specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveReasonCode {
    SpecifierInvalid,
    NotFound,
    NodeModulesNotFound,
    PackageNotFound,
    ManifestInvalid,
    PackageMainNotFound,
}

impl std::fmt::Display for ResolveReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SpecifierInvalid => "SPECIFIER_INVALID",
            Self::NotFound => "NOT_FOUND",
            Self::NodeModulesNotFound => "NODE_MODULES_NOT_FOUND",
            Self::PackageNotFound => "PACKAGE_NOT_FOUND",
            Self::ManifestInvalid => "MANIFEST_INVALID",
            Self::PackageMainNotFound => "PACKAGE_MAIN_NOT_FOUND",
        };
        write!(f, "{s}")
    }
}

/// Resolution result.
#[derive(Debug, Clone)]
pub struct ResolveResult {
    /// Resolved path (if successful).
    pub resolved: Option<PathBuf>,
    /// Status.
    pub status: ResolveStatus,
    /// Reason code if unresolved.
    pub reason: Option<ResolveReasonCode>,
    /// Candidate paths tried (capped).
    pub tried: Vec<PathBuf>,
}

impl ResolveResult {
    fn resolved(path: PathBuf, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: Some(path),
            status: ResolveStatus::Resolved,
            reason: None,
            tried,
        }
    }

    fn unresolved(reason: ResolveReasonCode, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: None,
            status: ResolveStatus::Unresolved,
            reason: Some(reason),
            tried,
        }
    }
}

/// Result of resolution with trace.
#[derive(Debug, Clone)]
pub struct ResolveResultWithTrace {
    /// The resolution result.
    pub result: ResolveResult,
    /// The resolution trace.
    pub trace: ResolveTrace,
}

/// Resolve a specifier to at most one file.
#[must_use]
pub fn resolve_specifier(ctx: &ResolveContext<'_>, spec: &str) -> ResolveResult {
    resolve_with_trace(ctx, spec).result
}

/// Resolve a specifier, keeping a step-by-step trace of the attempt.
#[must_use]
pub fn resolve_with_trace(ctx: &ResolveContext<'_>, spec: &str) -> ResolveResultWithTrace {
    let mut run = Run::new(ctx);

    let Some(specifier) = Specifier::parse(spec) else {
        run.trace
            .failure(steps::CLASSIFY_SPECIFIER, "Specifier is empty");
        return run.unresolved(ResolveReasonCode::SpecifierInvalid);
    };
    run.trace.success(
        steps::CLASSIFY_SPECIFIER,
        format!("Specifier type: {}", specifier.kind),
    );

    match specifier.kind {
        SpecifierKind::Relative => run.relative(&specifier.raw),
        SpecifierKind::Absolute => run.candidate(specifier.raw.clone()),
        SpecifierKind::Bare => run.bare(&specifier.raw),
    }
}

/// State of one resolution attempt.
struct Run<'r, 'a> {
    ctx: &'r ResolveContext<'a>,
    tried: Vec<PathBuf>,
    trace: ResolveTrace,
}

impl<'r, 'a> Run<'r, 'a> {
    fn new(ctx: &'r ResolveContext<'a>) -> Self {
        Self {
            ctx,
            tried: Vec::new(),
            trace: ResolveTrace::new(),
        }
    }

    fn relative(mut self, spec: &str) -> ResolveResultWithTrace {
        let base = self.ctx.parent.to_string_lossy();
        let joined = join_path(&base, spec);
        self.trace.add_step(
            ResolveTraceStep::new(
                steps::JOIN_PATH,
                true,
                format!("Joined onto importing directory: {base}"),
            )
            .with_path(&joined),
        );
        self.candidate(joined)
    }

    /// Clean `raw` and probe its file variants.
    fn candidate(mut self, raw: String) -> ResolveResultWithTrace {
        let cleaned = clean_path(&raw);
        let mut step = ResolveTraceStep::new(steps::NORMALIZE_PATH, true, "Collapsed . and ..")
            .with_path(&cleaned);
        if cleaned != raw {
            step = step.with_note(format!("from {raw}"));
        }
        self.trace.add_step(step);

        if has_unresolved_parent(&cleaned) {
            self.trace.add_warning(TraceWarning::new(
                warning_codes::UNRESOLVED_PARENT_SEGMENT,
                format!("'..' left in {cleaned} after normalization"),
            ));
        }

        match self.probe(&cleaned) {
            Some(found) => self.resolved(found),
            None => self.unresolved(ResolveReasonCode::NotFound),
        }
    }

    fn bare(mut self, spec: &str) -> ResolveResultWithTrace {
        let Some(node_modules) = find_node_modules(self.ctx.fs, &self.ctx.parent, self.ctx.config)
        else {
            self.trace.failure(
                steps::FIND_NODE_MODULES,
                format!(
                    "No {} directory above {}",
                    self.ctx.config.modules_dir,
                    self.ctx.parent.display()
                ),
            );
            return self.unresolved(ResolveReasonCode::NodeModulesNotFound);
        };
        self.trace.add_step(
            ResolveTraceStep::new(steps::FIND_NODE_MODULES, true, "Found dependency directory")
                .with_path(&node_modules),
        );

        let module_dir = join_path(&node_modules.to_string_lossy(), spec);
        self.add_tried(Path::new(&module_dir));

        if !self.ctx.fs.is_dir(Path::new(&module_dir)) {
            self.trace.add_step(
                ResolveTraceStep::new(steps::FIND_PACKAGE_DIR, false, "Not a package directory")
                    .with_path(&module_dir)
                    .with_note("probing as a file inside a package"),
            );
            let cleaned = clean_path(&module_dir);
            return match self.probe(&cleaned) {
                Some(found) => self.resolved(found),
                None => self.unresolved(ResolveReasonCode::PackageNotFound),
            };
        }
        self.trace.add_step(
            ResolveTraceStep::new(steps::FIND_PACKAGE_DIR, true, "Found package directory")
                .with_path(&module_dir),
        );

        let manifest_path = Path::new(&module_dir).join(&self.ctx.config.manifest_file);
        self.add_tried(&manifest_path);
        let manifest = match read_manifest(self.ctx.fs, &manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                let reason = if matches!(err, Error::ManifestParse { .. }) {
                    self.trace.add_warning(TraceWarning::new(
                        warning_codes::MALFORMED_MANIFEST,
                        err.to_string(),
                    ));
                    ResolveReasonCode::ManifestInvalid
                } else {
                    ResolveReasonCode::PackageMainNotFound
                };
                self.trace.add_step(
                    ResolveTraceStep::new(steps::READ_MANIFEST, false, err.to_string())
                        .with_path(&manifest_path),
                );
                return self.unresolved(reason);
            }
        };
        self.trace.add_step(
            ResolveTraceStep::new(steps::READ_MANIFEST, true, "Parsed manifest")
                .with_path(&manifest_path),
        );

        let Some(main) = manifest.main() else {
            self.trace
                .failure(steps::READ_MAIN, "Manifest declares no main entry point");
            return self.unresolved(ResolveReasonCode::PackageMainNotFound);
        };
        self.trace
            .success(steps::READ_MAIN, format!("Entry point: {main}"));

        let entry = join_path(&module_dir, main);
        self.candidate(entry)
    }

    fn probe(&mut self, candidate: &str) -> Option<PathBuf> {
        let ctx = self.ctx;
        let mut probed = Vec::new();
        let found = probe_variants(ctx.fs, candidate, &ctx.config.variant_extensions, |p| {
            probed.push(p.to_path_buf());
        });
        for path in &probed {
            self.add_tried(path);
        }

        match &found {
            Some(path) => self.trace.add_step(
                ResolveTraceStep::new(steps::PROBE_VARIANT, true, "File exists").with_path(path),
            ),
            None => self.trace.add_step(
                ResolveTraceStep::new(
                    steps::PROBE_VARIANT,
                    false,
                    format!("No variant of {candidate} exists"),
                )
                .with_path(candidate),
            ),
        }
        found
    }

    fn add_tried(&mut self, path: &Path) {
        if self.tried.len() < MAX_TRIED_PATHS {
            self.tried.push(path.to_path_buf());
        }
    }

    fn resolved(mut self, path: PathBuf) -> ResolveResultWithTrace {
        self.trace.add_step(
            ResolveTraceStep::new(steps::FINAL_PATH, true, "Resolution complete").with_path(&path),
        );
        ResolveResultWithTrace {
            result: ResolveResult::resolved(path, self.tried),
            trace: self.trace,
        }
    }

    fn unresolved(self, reason: ResolveReasonCode) -> ResolveResultWithTrace {
        ResolveResultWithTrace {
            result: ResolveResult::unresolved(reason, self.tried),
            trace: self.trace,
        }
    }
}
