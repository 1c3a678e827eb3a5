//! Import specifier extractor.
//!
//! Scans one line of source text for module specifiers without parsing.
//! CommonJS `require` calls win over ES `import ... from` on the same line.

use regex::Regex;
use std::sync::OnceLock;

fn require_call() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\brequire\s*\(\s*["']([^"']+)"#).ok())
        .as_ref()
}

fn import_from() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"import.*\sfrom\s+["']([^"']+)"#).ok())
        .as_ref()
}

/// How a specifier is located on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// Starts with `.`; joined onto the importing file's directory.
    Relative,
    /// Starts with `/`; used as-is.
    Absolute,
    /// Anything else; looked up in an installed-dependency directory.
    Bare,
}

impl SpecifierKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Bare => "bare",
        }
    }
}

impl std::fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module specifier found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Specifier exactly as found.
    pub raw: String,
    /// Classification used to pick a resolution strategy.
    pub kind: SpecifierKind,
}

impl Specifier {
    /// Classify a raw specifier. Returns `None` for an empty string.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let kind = match raw.chars().next()? {
            '.' => SpecifierKind::Relative,
            '/' => SpecifierKind::Absolute,
            _ => SpecifierKind::Bare,
        };
        Some(Self { raw, kind })
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.kind == SpecifierKind::Relative
    }
}

/// Extract the module specifiers referenced on one line, in source order.
///
/// Every `require("...")` on the line is returned. Only when there is none
/// is the first `import ... from "..."` consulted. The captured text stops
/// at the first quote of either kind. Statements spanning several lines are
/// not recognized.
#[must_use]
pub fn extract_import_values(line: &str) -> Vec<String> {
    if let Some(re) = require_call() {
        let values: Vec<String> = re
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        if !values.is_empty() {
            return values;
        }
    }

    import_from()
        .and_then(|re| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default()
}

/// Extract and classify the specifiers on one line.
#[must_use]
pub fn extract_specifiers(line: &str) -> Vec<Specifier> {
    extract_import_values(line)
        .into_iter()
        .filter_map(Specifier::parse)
        .collect()
}
