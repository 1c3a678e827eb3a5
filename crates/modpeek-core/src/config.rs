use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default package manifest file name.
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

/// Default installed-dependency directory name.
pub const DEFAULT_MODULES_DIR: &str = "node_modules";

/// Default cap on ancestor directories visited by upward walks.
pub const DEFAULT_MAX_ANCESTOR_HOPS: usize = 20;

/// Runtime configuration for the modpeek CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Resolver settings.
    pub resolver: ResolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            resolver: ResolverConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Replace the resolver settings.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Resolver configuration.
///
/// Every field is optional in the on-disk JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Manifest file looked up in package roots and package directories.
    pub manifest_file: String,
    /// Directory holding installed dependencies.
    pub modules_dir: String,
    /// Maximum number of ancestor directories tested by upward walks.
    pub max_ancestor_hops: usize,
    /// Suffixes appended when probing file variants (in order).
    pub variant_extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            modules_dir: DEFAULT_MODULES_DIR.to_string(),
            max_ancestor_hops: DEFAULT_MAX_ANCESTOR_HOPS,
            variant_extensions: vec![".js".to_string(), ".json".to_string()],
        }
    }
}

impl ResolverConfig {
    /// Load resolver settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
