//! Import path autocompletion.
//!
//! Candidates come from two places: dependency names declared in the package
//! manifest, and `.js` files anywhere in the project outside `node_modules`.

use crate::config::ResolverConfig;
use crate::paths::resolve_relative_path;
use crate::resolver::{find_package_root, read_manifest, FileSystem};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

fn require_prefix() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^.*\brequire\s*\(['"]\w"#).ok())
        .as_ref()
}

// A single literal space before the quote; `from"x` and `from\t"x` do not trigger.
fn from_prefix() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^.*\bfrom\s* ['"]\w"#).ok())
        .as_ref()
}

/// One completion entry offered to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Display label: `<name>\t<hint>`.
    pub label: String,
    /// Text inserted when the entry is accepted.
    pub insertion: String,
}

impl Completion {
    fn new(name: &str, hint: &str, insertion: impl Into<String>) -> Self {
        Self {
            label: format!("{name}\t{hint}"),
            insertion: insertion.into(),
        }
    }
}

/// Whether the text before the cursor is the inside of an import path.
#[must_use]
pub fn should_do_autocomplete(line_until_cursor: &str) -> bool {
    [require_prefix(), from_prefix()]
        .into_iter()
        .flatten()
        .any(|re| re.is_match(line_until_cursor))
}

/// Completion candidates for `prefix`, typed in `file_path`.
///
/// Returns an empty list when no package root encloses the file. A malformed
/// manifest drops the dependency candidates but not the file candidates.
#[must_use]
pub fn completion_candidates(
    fs: &dyn FileSystem,
    config: &ResolverConfig,
    file_path: &Path,
    prefix: &str,
) -> Vec<Completion> {
    let Some(dirname) = file_path.parent() else {
        return Vec::new();
    };
    let Some(package_root) = find_package_root(fs, dirname, config) else {
        return Vec::new();
    };

    let mut candidates = Vec::new();

    let manifest_path = package_root.join(&config.manifest_file);
    if let Ok(manifest) = read_manifest(fs, &manifest_path) {
        candidates.extend(
            manifest
                .dependency_names()
                .into_iter()
                .filter(|name| name.starts_with(prefix))
                .map(|name| Completion::new(name, &config.manifest_file, name)),
        );
    }

    let Ok(pattern) = glob::Pattern::new(&format!("{}*.js", glob::Pattern::escape(prefix)))
    else {
        return candidates;
    };
    let base = dirname.to_string_lossy();
    for path in fs.walk_files(&package_root, &config.modules_dir) {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
            continue;
        };
        if !pattern.matches(&file_name) {
            continue;
        }
        let relative = resolve_relative_path(&base, &path.to_string_lossy());
        candidates.push(Completion::new(&file_name, &relative, relative.clone()));
    }

    candidates
}

/// Completion entry point for an editor: `None` when the cursor is not in an
/// import path (or the buffer is unsaved), otherwise the candidate list.
#[must_use]
pub fn query_completions(
    fs: &dyn FileSystem,
    config: &ResolverConfig,
    line_until_cursor: &str,
    prefix: &str,
    file_path: Option<&Path>,
) -> Option<Vec<Completion>> {
    if !should_do_autocomplete(line_until_cursor) {
        return None;
    }
    let file_path = file_path?;
    Some(completion_candidates(fs, config, file_path, prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{MemoryFileSystem, OsFileSystem};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_trigger_require() {
        assert!(should_do_autocomplete(r#"var asd = require("a"#));
        assert!(should_do_autocomplete("var asd = require('a"));
        assert!(should_do_autocomplete("var asd = require ('u"));
    }

    #[test]
    fn test_trigger_from() {
        assert!(should_do_autocomplete(r#"import asd from "a"#));
        assert!(should_do_autocomplete("import asd from 'a"));
    }

    #[test]
    fn test_no_trigger() {
        assert!(!should_do_autocomplete(""));
        assert!(!should_do_autocomplete("foo"));
        assert!(!should_do_autocomplete("require"));
        assert!(!should_do_autocomplete("from"));
        assert!(!should_do_autocomplete("require('"));
        assert!(!should_do_autocomplete("myrequire('a"));
    }

    #[test]
    fn test_from_needs_literal_space_before_quote() {
        assert!(!should_do_autocomplete(r#"import a from"x"#));
        assert!(!should_do_autocomplete("import a from\t'x"));
    }

    #[test]
    fn test_word_char_required_after_quote() {
        // `.` is not a word character, so relative paths trigger only once a
        // segment name is being typed.
        assert!(!should_do_autocomplete("require('./"));
        assert!(should_do_autocomplete("require('a/b"));
    }

    #[test]
    fn test_trigger_non_ascii_word_char() {
        assert!(should_do_autocomplete("require('é"));
        assert!(should_do_autocomplete("import x from 'ü"));
        assert!(!should_do_autocomplete("érequire('a"));
    }

    fn project() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file(
                "/proj/package.json",
                r#"{
                    "dependencies": {"lodash": "^4", "react": "^18"},
                    "devDependencies": {"lint-staged": "^15"}
                }"#,
            )
            .with_file("/proj/src/index.js", "")
            .with_file("/proj/src/list.js", "")
            .with_file("/proj/src/lib/loader.js", "")
            .with_file("/proj/lib/logger.js", "")
            .with_file("/proj/lib/logger.json", "")
            .with_file("/proj/node_modules/lodash/lodash.js", "")
    }

    #[test]
    fn test_candidates() {
        let candidates = completion_candidates(
            &project(),
            &ResolverConfig::default(),
            Path::new("/proj/src/index.js"),
            "l",
        );
        let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "lodash\tpackage.json",
                "lint-staged\tpackage.json",
                "logger.js\t../lib/logger.js",
                "loader.js\t./lib/loader.js",
                "list.js\t./list.js",
            ]
        );
        assert_eq!(candidates[0].insertion, "lodash");
        assert_eq!(candidates[2].insertion, "../lib/logger.js");
    }

    #[test]
    fn test_candidates_prefix_filters_everything() {
        let candidates = completion_candidates(
            &project(),
            &ResolverConfig::default(),
            Path::new("/proj/src/index.js"),
            "re",
        );
        assert_eq!(candidates, vec![Completion::new("react", "package.json", "react")]);
    }

    #[test]
    fn test_dependencies_keep_manifest_order() {
        let fs = MemoryFileSystem::new().with_file(
            "/proj/package.json",
            r#"{
                "dependencies": {"zlib": "1", "async": "3"},
                "devDependencies": {"yargs": "17", "ava": "6"}
            }"#,
        );
        let candidates = completion_candidates(
            &fs,
            &ResolverConfig::default(),
            Path::new("/proj/index.js"),
            "",
        );
        let insertions: Vec<&str> = candidates.iter().map(|c| c.insertion.as_str()).collect();
        assert_eq!(insertions, vec!["zlib", "async", "yargs", "ava"]);
    }

    #[test]
    fn test_candidates_without_package_root() {
        let fs = MemoryFileSystem::new().with_file("/loose/a.js", "");
        let candidates = completion_candidates(
            &fs,
            &ResolverConfig::default(),
            Path::new("/loose/a.js"),
            "a",
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidates_malformed_manifest_keeps_files() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/package.json", "{ oops")
            .with_file("/proj/app.js", "");
        let candidates = completion_candidates(
            &fs,
            &ResolverConfig::default(),
            Path::new("/proj/app.js"),
            "a",
        );
        assert_eq!(candidates, vec![Completion::new("app.js", "./app.js", "./app.js")]);
    }

    #[test]
    fn test_prefix_with_glob_characters_is_literal() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/package.json", "{}")
            .with_file("/proj/[x].js", "")
            .with_file("/proj/x.js", "");
        let candidates = completion_candidates(
            &fs,
            &ResolverConfig::default(),
            Path::new("/proj/index.js"),
            "[x]",
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].insertion, "./[x].js");
    }

    #[test]
    fn test_query_completions() {
        let fs = project();
        let config = ResolverConfig::default();
        let file = Path::new("/proj/src/index.js");

        assert!(query_completions(&fs, &config, "const x = 1", "x", Some(file)).is_none());
        assert!(query_completions(&fs, &config, "require('r", "r", None).is_none());
        let candidates = query_completions(&fs, &config, "require('r", "r", Some(file)).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_candidates_on_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/util")).unwrap();
        fs::write(dir.path().join("src/index.js"), "").unwrap();
        fs::write(dir.path().join("src/util.js"), "").unwrap();
        fs::write(dir.path().join("node_modules/util/util.js"), "").unwrap();

        let candidates = completion_candidates(
            &OsFileSystem,
            &ResolverConfig::default(),
            &dir.path().join("src/index.js"),
            "u",
        );
        assert_eq!(candidates, vec![Completion::new("util.js", "./util.js", "./util.js")]);
    }
}
