//! Resolution tracing.
//!
//! Records each step the resolver takes so a host (or `modpeek resolve --trace`)
//! can show why a specifier landed on a given file, or why it did not.

use serde::Serialize;
use std::path::PathBuf;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (one of the [`steps`] constants)
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// File path involved in this step, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
            notes: Vec::new(),
        }
    }

    /// Set the path for this step.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a note to this step.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Warning generated during resolution.
#[derive(Debug, Clone, Serialize)]
pub struct TraceWarning {
    /// Warning code (one of the [`warning_codes`] constants)
    pub code: &'static str,
    /// Human-readable warning message
    pub message: String,
}

impl TraceWarning {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
    /// Warnings generated during resolution
    pub warnings: Vec<TraceWarning>,
}

impl ResolveTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    pub fn add_warning(&mut self, warning: TraceWarning) {
        self.warnings.push(warning);
    }

    /// Add a simple success step.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, true, detail));
    }

    /// Add a simple failure step.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }

    /// Whether a step with the given name was recorded.
    #[must_use]
    pub fn has_step(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s.step == step)
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const CLASSIFY_SPECIFIER: &str = "classify_specifier";
    pub const JOIN_PATH: &str = "join_path";
    pub const NORMALIZE_PATH: &str = "normalize_path";
    pub const PROBE_VARIANT: &str = "probe_variant";
    pub const FIND_NODE_MODULES: &str = "find_node_modules";
    pub const FIND_PACKAGE_DIR: &str = "find_package_dir";
    pub const READ_MANIFEST: &str = "read_manifest";
    pub const READ_MAIN: &str = "read_main";
    pub const FINAL_PATH: &str = "final_path";
}

/// Warning codes used in resolution tracing.
pub mod warning_codes {
    pub const MALFORMED_MANIFEST: &str = "malformed_manifest";
    pub const UNRESOLVED_PARENT_SEGMENT: &str = "unresolved_parent_segment";
}
