//! Hover preview: which files does the import on this line point at?

use crate::config::ResolverConfig;
use crate::imports::extract_specifiers;
use crate::resolver::{resolve_specifier, FileSystem, ResolveContext};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Resolved targets for one hovered line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverPreview {
    pub paths: Vec<PathBuf>,
}

impl HoverPreview {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Render the targets as links, one per line (`<br>` separated).
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                html.push_str("<br>");
            }
            let escaped = escape_html(&path.to_string_lossy());
            let _ = write!(html, r#"<a href="{escaped}">{escaped}</a>"#);
        }
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolve the specifiers on `line`, written in `file_path`.
///
/// Resolution stops at the first relative specifier that resolves; bare
/// specifiers each contribute their target. A buffer without a path
/// (unsaved) yields nothing.
#[must_use]
pub fn hover_targets(
    fs: &dyn FileSystem,
    config: &ResolverConfig,
    line: &str,
    file_path: Option<&Path>,
) -> HoverPreview {
    let Some(ctx) = file_path.and_then(|file| ResolveContext::for_file(fs, config, file)) else {
        return HoverPreview::default();
    };

    let mut paths = Vec::new();
    for specifier in extract_specifiers(line) {
        let result = resolve_specifier(&ctx, &specifier.raw);
        if let Some(path) = result.resolved {
            paths.push(path);
            if specifier.is_relative() {
                break;
            }
        }
    }
    HoverPreview { paths }
}
