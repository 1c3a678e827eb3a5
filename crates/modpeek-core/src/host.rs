//! Editor host capabilities.
//!
//! The editor owns buffers, popups and file opening; modpeek only talks to
//! it through [`EditorView`]. [`ImportPreview`] is the event listener a host
//! wires its hover and completion events into.

use crate::completion::{query_completions, Completion};
use crate::config::ResolverConfig;
use crate::hover::{hover_targets, HoverPreview};
use crate::resolver::{FileSystem, OsFileSystem};
use std::path::{Path, PathBuf};

/// Byte offset into a buffer.
pub type Point = usize;

/// What modpeek needs from the editor's current view.
pub trait EditorView {
    /// Path of the buffer on disk; `None` for unsaved buffers.
    fn file_path(&self) -> Option<PathBuf>;

    /// Full text of the line containing `point`, without the line break.
    fn line_text(&self, point: Point) -> String;

    /// Text from the start of the line containing `point` up to `point`.
    fn line_prefix(&self, point: Point) -> String;

    /// Show a dismissible popup of link-bearing HTML anchored at `point`.
    fn show_popup(&mut self, html: &str, point: Point);

    /// Open `path` in the editor.
    fn open_file(&mut self, path: &Path);
}

/// Hover and completion listener.
#[derive(Debug, Clone, Default)]
pub struct ImportPreview<F: FileSystem = OsFileSystem> {
    fs: F,
    config: ResolverConfig,
}

impl<F: FileSystem> ImportPreview<F> {
    pub fn new(fs: F, config: ResolverConfig) -> Self {
        Self { fs, config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Preview the import targets on the hovered line.
    ///
    /// A popup is shown only when at least one target resolved.
    pub fn on_hover(&self, view: &mut dyn EditorView, point: Point) -> HoverPreview {
        let line = view.line_text(point);
        let file_path = view.file_path();
        let preview = hover_targets(&self.fs, &self.config, &line, file_path.as_deref());
        if !preview.is_empty() {
            view.show_popup(&preview.to_html(), point);
        }
        preview
    }

    /// Completion candidates at `point`, or `None` when the cursor is not
    /// inside an import path.
    pub fn on_query_completions(
        &self,
        view: &dyn EditorView,
        prefix: &str,
        point: Point,
    ) -> Option<Vec<Completion>> {
        let line_until_cursor = view.line_prefix(point);
        let file_path = view.file_path();
        query_completions(
            &self.fs,
            &self.config,
            &line_until_cursor,
            prefix,
            file_path.as_deref(),
        )
    }

    /// A link in the hover popup was clicked.
    pub fn on_link_clicked(&self, view: &mut dyn EditorView, href: &str) {
        view.open_file(Path::new(href));
    }
}

/// An in-memory text buffer implementing [`EditorView`].
///
/// Popups and opened files are recorded rather than displayed, so terminal
/// hosts and tests can inspect them.
#[derive(Debug, Clone, Default)]
pub struct BufferView {
    path: Option<PathBuf>,
    text: String,
    /// Popups shown so far, with their anchor points.
    pub popups: Vec<(String, Point)>,
    /// Files opened so far.
    pub opened: Vec<PathBuf>,
}

impl BufferView {
    pub fn new(path: Option<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path,
            text: text.into(),
            popups: Vec::new(),
            opened: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Point at a 1-based line and 0-based character column, clamped to the
    /// end of that line. `None` when the line does not exist.
    #[must_use]
    pub fn point_at(&self, line: usize, column: usize) -> Option<Point> {
        let index = line.checked_sub(1)?;
        let mut start = 0;
        for (i, text) in self.text.split('\n').enumerate() {
            if i == index {
                let text = text.strip_suffix('\r').unwrap_or(text);
                let offset = text
                    .char_indices()
                    .nth(column)
                    .map_or(text.len(), |(byte, _)| byte);
                return Some(start + offset);
            }
            start += text.len() + 1;
        }
        None
    }

    fn line_bounds(&self, point: Point) -> (usize, usize) {
        let point = self.clamp(point);
        let start = self.text[..point].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[point..]
            .find('\n')
            .map_or(self.text.len(), |i| point + i);
        let end = if self.text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };
        (start, end)
    }

    fn clamp(&self, point: Point) -> Point {
        let mut point = point.min(self.text.len());
        while !self.text.is_char_boundary(point) {
            point -= 1;
        }
        point
    }
}

impl EditorView for BufferView {
    fn file_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn line_text(&self, point: Point) -> String {
        let (start, end) = self.line_bounds(point);
        self.text[start..end].to_string()
    }

    fn line_prefix(&self, point: Point) -> String {
        let (start, end) = self.line_bounds(point);
        let point = self.clamp(point).min(end);
        self.text[start..point].to_string()
    }

    fn show_popup(&mut self, html: &str, point: Point) {
        self.popups.push((html.to_string(), point));
    }

    fn open_file(&mut self, path: &Path) {
        self.opened.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MemoryFileSystem;

    const SOURCE: &str = "const util = require('./util');\r\nimport _ from 'lodash';\nlet x = 1;\n";

    fn listener() -> ImportPreview<MemoryFileSystem> {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/package.json", r#"{"dependencies": {"lodash": "^4"}}"#)
            .with_file("/proj/src/index.js", SOURCE)
            .with_file("/proj/src/util.js", "")
            .with_file("/proj/node_modules/lodash/package.json", r#"{"main": "index.js"}"#)
            .with_file("/proj/node_modules/lodash/index.js", "");
        ImportPreview::new(fs, ResolverConfig::default())
    }

    fn view() -> BufferView {
        BufferView::new(Some(PathBuf::from("/proj/src/index.js")), SOURCE)
    }

    #[test]
    fn test_line_lookup() {
        let view = view();
        let point = view.point_at(2, 5).unwrap();
        assert_eq!(view.line_text(point), "import _ from 'lodash';");
        assert_eq!(view.line_prefix(point), "impor");
        assert_eq!(view.line_text(0), "const util = require('./util');");
        assert!(view.point_at(0, 0).is_none());
        assert!(view.point_at(9, 0).is_none());
    }

    #[test]
    fn test_point_clamps_to_line_end() {
        let view = view();
        let point = view.point_at(3, 500).unwrap();
        assert_eq!(view.line_prefix(point), "let x = 1;");
    }

    #[test]
    fn test_hover_shows_popup() {
        let listener = listener();
        let mut view = view();
        let point = view.point_at(1, 3).unwrap();

        let preview = listener.on_hover(&mut view, point);
        assert_eq!(preview.paths, vec![PathBuf::from("/proj/src/util.js")]);
        assert_eq!(view.popups.len(), 1);
        assert_eq!(
            view.popups[0].0,
            r#"<a href="/proj/src/util.js">/proj/src/util.js</a>"#
        );
    }

    #[test]
    fn test_hover_without_targets_shows_nothing() {
        let listener = listener();
        let mut view = view();
        let point = view.point_at(3, 0).unwrap();

        assert!(listener.on_hover(&mut view, point).is_empty());
        assert!(view.popups.is_empty());
    }

    #[test]
    fn test_hover_unsaved_buffer() {
        let listener = listener();
        let mut view = BufferView::new(None, SOURCE);
        assert!(listener.on_hover(&mut view, 0).is_empty());
        assert!(view.popups.is_empty());
    }

    #[test]
    fn test_completions() {
        let listener = listener();
        let view = BufferView::new(
            Some(PathBuf::from("/proj/src/index.js")),
            "const l = require('lo",
        );
        let point = view.text().len();

        let candidates = listener.on_query_completions(&view, "lo", point).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].insertion, "lodash");

        assert!(listener.on_query_completions(&view, "lo", 5).is_none());
    }

    #[test]
    fn test_link_click_opens_file() {
        let listener = listener();
        let mut view = view();
        listener.on_link_clicked(&mut view, "/proj/src/util.js");
        assert_eq!(view.opened, vec![PathBuf::from("/proj/src/util.js")]);
    }
}
