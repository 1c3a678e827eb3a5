//! Package manifest (`package.json`) access.
//!
//! Only `main`, `dependencies` and `devDependencies` are consulted. Any of
//! them may be missing or have an unexpected shape; both cases read as absent.

use super::fs::FileSystem;
use crate::error::Error;
use serde_json::Value;
use std::path::Path;

/// A parsed package manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    value: Value,
}

impl Manifest {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value = serde_json::from_str(text)?;
        Ok(Self { value })
    }

    /// The declared entry point, if it is a non-empty string.
    #[must_use]
    pub fn main(&self) -> Option<&str> {
        self.value
            .get("main")
            .and_then(Value::as_str)
            .filter(|main| !main.is_empty())
    }

    /// Names under `dependencies`, then under `devDependencies`, each in
    /// the order the manifest lists them.
    #[must_use]
    pub fn dependency_names(&self) -> Vec<&str> {
        ["dependencies", "devDependencies"]
            .iter()
            .filter_map(|field| self.value.get(field).and_then(Value::as_object))
            .flat_map(|deps| deps.keys().map(String::as_str))
            .collect()
    }
}

/// Read and parse the manifest at `path`.
pub fn read_manifest(fs: &dyn FileSystem, path: &Path) -> Result<Manifest, Error> {
    let content = fs.read_to_string(path).map_err(|source| Error::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    Manifest::parse(&content).map_err(|source| Error::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
