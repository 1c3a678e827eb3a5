use super::open_view;
use miette::{IntoDiagnostic, Result};
use modpeek_core::{Completion, Config, EditorView, ImportPreview, OsFileSystem};
use serde::Serialize;
use std::path::Path;

/// Cursor position: 1-based line, 0-based character column.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// JSON output of `modpeek complete`.
#[derive(Debug, Serialize)]
struct CompleteOutput {
    ok: bool,
    triggered: bool,
    prefix: String,
    candidates: Vec<Completion>,
}

/// Run the complete command.
pub fn run(
    config: &Config,
    file: &Path,
    cursor: Cursor,
    prefix: Option<&str>,
    json: bool,
) -> Result<()> {
    let view = open_view(&config.cwd, file)?;
    let Some(point) = view.point_at(cursor.line, cursor.column) else {
        return Err(miette::miette!(
            "Line {} is out of range for {}",
            cursor.line,
            file.display()
        ));
    };

    let prefix = match prefix {
        Some(p) => p.to_string(),
        None => trailing_word(&view.line_prefix(point)).to_string(),
    };

    let listener = ImportPreview::new(OsFileSystem, config.resolver.clone());
    let candidates = listener.on_query_completions(&view, &prefix, point);
    let triggered = candidates.is_some();
    let candidates = candidates.unwrap_or_default();
    tracing::debug!(
        triggered,
        prefix = %prefix,
        candidates = candidates.len(),
        "completion query"
    );

    if json {
        let output = CompleteOutput {
            ok: true,
            triggered,
            prefix,
            candidates,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        for candidate in &candidates {
            println!("{}\t{}", candidate.label, candidate.insertion);
        }
    }

    Ok(())
}

/// The word characters immediately before the cursor.
fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_word() {
        assert_eq!(trailing_word("require('lod"), "lod");
        assert_eq!(trailing_word("require('./u"), "u");
        assert_eq!(trailing_word("require('"), "");
        assert_eq!(trailing_word("my_mod"), "my_mod");
        assert_eq!(trailing_word(""), "");
    }
}
