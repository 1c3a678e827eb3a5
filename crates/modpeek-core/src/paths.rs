//! Path algebra over `/`-separated path strings.
//!
//! Nothing here touches the filesystem. Paths are treated as plain strings so
//! the behavior is identical on every platform and trivially unit-testable.

use regex_lite::Regex;
use std::sync::OnceLock;

fn current_dir_segment() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/\./").ok()).as_ref()
}

fn parent_dir_segment() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/[^/]+/\.\./").ok()).as_ref()
}

/// Collapse `/./` and `/<segment>/../` in a path.
///
/// Each rule is applied once over the whole string (all non-overlapping
/// matches, left to right); the result is not iterated to a fixed point.
/// A path with stacked `..` segments such as `/a/b/../../c` is therefore
/// only partially collapsed. See [`has_unresolved_parent`].
#[must_use]
pub fn clean_path(path: &str) -> String {
    let mut cleaned = path.to_string();
    if let Some(re) = current_dir_segment() {
        cleaned = re.replace_all(&cleaned, "/").into_owned();
    }
    if let Some(re) = parent_dir_segment() {
        cleaned = re.replace_all(&cleaned, "/").into_owned();
    }
    cleaned
}

/// Whether a `..` segment survives in a (cleaned) path.
#[must_use]
pub fn has_unresolved_parent(path: &str) -> bool {
    path.contains("/../") || path.ends_with("/..")
}

/// Compute the relative path expression leading from `base` to `target`.
///
/// Both inputs are absolute paths. The result always starts with `./` or `../`.
#[must_use]
pub fn resolve_relative_path(base: &str, target: &str) -> String {
    let base_segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let target_segments: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let common = base_segments
        .iter()
        .zip(&target_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let base_rest = &base_segments[common..];
    let target_rest = target_segments[common..].join("/");

    if base_rest.is_empty() {
        format!("./{target_rest}")
    } else {
        let parents = vec![".."; base_rest.len()].join("/");
        format!("{parents}/{target_rest}")
    }
}

/// Join a directory and a relative piece with a single separator.
///
/// An absolute `rel` replaces `base` entirely.
#[must_use]
pub fn join_path(base: &str, rel: &str) -> String {
    if rel.starts_with('/') || base.is_empty() {
        return rel.to_string();
    }
    if base.ends_with('/') {
        format!("{base}{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_current_dir() {
        assert_eq!(clean_path("/foo/./bar"), "/foo/bar");
    }

    #[test]
    fn test_clean_path_parent_dir() {
        assert_eq!(clean_path("/foo/../bar"), "/bar");
    }

    #[test]
    fn test_clean_path_both_rules() {
        assert_eq!(clean_path("/proj/src/./../lib/a.js"), "/proj/lib/a.js");
    }

    #[test]
    fn test_clean_path_untouched() {
        assert_eq!(clean_path("/proj/src/index.js"), "/proj/src/index.js");
        assert_eq!(clean_path("/proj/.hidden/a.js"), "/proj/.hidden/a.js");
    }

    #[test]
    fn test_clean_path_is_single_pass() {
        let cleaned = clean_path("/a/b/../../c");
        assert_eq!(cleaned, "/a/../c");
        assert!(has_unresolved_parent(&cleaned));
    }

    #[test]
    fn test_has_unresolved_parent() {
        assert!(!has_unresolved_parent("/proj/src/a.js"));
        assert!(has_unresolved_parent("/proj/.."));
        assert!(!has_unresolved_parent("/proj/..a/b"));
    }

    #[test]
    fn test_resolve_relative_path_child() {
        assert_eq!(
            resolve_relative_path("/foobar/test", "/foobar/test/asd.js"),
            "./asd.js"
        );
    }

    #[test]
    fn test_resolve_relative_path_sibling() {
        assert_eq!(
            resolve_relative_path("/foobar/test", "/foobar/src/asd.js"),
            "../src/asd.js"
        );
    }

    #[test]
    fn test_resolve_relative_path_from_root() {
        assert_eq!(resolve_relative_path("/", "/foobar/test.js"), "./foobar/test.js");
        assert_eq!(
            resolve_relative_path("/foo", "/foo/foobar/test.js"),
            "./foobar/test.js"
        );
    }

    #[test]
    fn test_resolve_relative_path_several_levels_up() {
        assert_eq!(
            resolve_relative_path("/proj/src/a/b", "/proj/lib/x.js"),
            "../../../lib/x.js"
        );
    }

    #[test]
    fn test_resolve_relative_path_trailing_slash() {
        assert_eq!(resolve_relative_path("/proj/src/", "/proj/src/x.js"), "./x.js");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/proj/src", "./util"), "/proj/src/./util");
        assert_eq!(join_path("/", "util"), "/util");
        assert_eq!(join_path("/proj", "/abs/x.js"), "/abs/x.js");
        assert_eq!(join_path("", "x.js"), "x.js");
    }
}
