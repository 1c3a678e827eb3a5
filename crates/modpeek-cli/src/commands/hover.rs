use super::open_view;
use miette::{IntoDiagnostic, Result};
use modpeek_core::{extract_import_values, Config, EditorView, ImportPreview, OsFileSystem};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON output of `modpeek hover`.
#[derive(Debug, Serialize)]
struct HoverOutput {
    ok: bool,
    file: PathBuf,
    line: usize,
    specifiers: Vec<String>,
    targets: Vec<PathBuf>,
}

/// Run the hover command.
///
/// Prints the resolved targets one per line, the popup HTML with `html`, or a
/// single JSON object with `json`.
pub fn run(config: &Config, file: &Path, line: usize, html: bool, json: bool) -> Result<()> {
    let mut view = open_view(&config.cwd, file)?;
    let Some(point) = view.point_at(line, 0) else {
        return Err(miette::miette!(
            "Line {} is out of range for {}",
            line,
            file.display()
        ));
    };

    let listener = ImportPreview::new(OsFileSystem, config.resolver.clone());
    let preview = listener.on_hover(&mut view, point);
    let specifiers = extract_import_values(&view.line_text(point));
    tracing::debug!(
        specifiers = specifiers.len(),
        targets = preview.paths.len(),
        "hover preview"
    );

    if json {
        let output = HoverOutput {
            ok: true,
            file: view.file_path().unwrap_or_else(|| file.to_path_buf()),
            line,
            specifiers,
            targets: preview.paths,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else if html {
        for (popup, _) in &view.popups {
            println!("{popup}");
        }
    } else {
        for path in &preview.paths {
            println!("{}", path.display());
        }
    }

    Ok(())
}
