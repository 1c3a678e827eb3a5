use super::absolutize;
use miette::{IntoDiagnostic, Result};
use modpeek_core::resolver::{ResolveTraceStep, TraceWarning};
use modpeek_core::{
    resolve_with_trace, Config, OsFileSystem, ResolveContext, ResolveStatus, Specifier,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON output of `modpeek resolve`.
#[derive(Debug, Serialize)]
struct ResolveOutput {
    ok: bool,
    specifier: String,
    kind: Option<&'static str>,
    parent: PathBuf,
    status: String,
    resolved: Option<PathBuf>,
    reason: Option<String>,
    tried: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<ResolveTraceStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<TraceWarning>>,
}

/// Run the resolve command.
///
/// Exits with status 1 when the specifier does not resolve.
pub fn run(config: &Config, specifier: &str, from: &Path, trace: bool, json: bool) -> Result<()> {
    let from = absolutize(&config.cwd, from);
    let fs = OsFileSystem;
    let Some(ctx) = ResolveContext::for_file(&fs, &config.resolver, &from) else {
        return Err(miette::miette!(
            "Cannot resolve imports from {}: no parent directory",
            from.display()
        ));
    };

    let traced = resolve_with_trace(&ctx, specifier);
    for step in &traced.trace.steps {
        tracing::trace!(step = step.step, ok = step.ok, detail = %step.detail, "resolve step");
    }
    tracing::debug!(
        specifier,
        status = %traced.result.status,
        resolved = ?traced.result.resolved,
        "resolution finished"
    );

    let result = traced.result;
    let output = ResolveOutput {
        ok: result.status == ResolveStatus::Resolved,
        specifier: specifier.to_string(),
        kind: Specifier::parse(specifier).map(|s| s.kind.as_str()),
        parent: ctx.parent.clone(),
        status: result.status.to_string(),
        resolved: result.resolved,
        reason: result.reason.map(|r| r.to_string()),
        tried: result.tried,
        trace: trace.then(|| traced.trace.steps.clone()),
        warnings: trace.then(|| traced.trace.warnings.clone()),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        print_human(&output);
    }

    if !output.ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_human(output: &ResolveOutput) {
    println!("Specifier: {}", output.specifier);
    if let Some(kind) = output.kind {
        println!("Kind: {kind}");
    }
    println!("Parent: {}", output.parent.display());
    println!();

    if let Some(ref resolved) = output.resolved {
        println!("Resolved: {}", resolved.display());
    } else {
        println!("Status: UNRESOLVED");
        if let Some(ref reason) = output.reason {
            println!("Error: {reason}");
        }
    }

    if let Some(ref steps) = output.trace {
        println!();
        println!("Resolution trace:");
        for (i, step) in steps.iter().enumerate() {
            let status = if step.ok { "OK" } else { "FAIL" };
            println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);
            if let Some(ref path) = step.path {
                println!("      path: {}", path.display());
            }
            for note in &step.notes {
                println!("      note: {note}");
            }
        }

        if !output.tried.is_empty() {
            println!();
            println!("Tried:");
            for path in &output.tried {
                println!("  {}", path.display());
            }
        }
    }

    if let Some(ref warnings) = output.warnings {
        if !warnings.is_empty() {
            println!();
            println!("Warnings:");
            for warning in warnings {
                println!("  [{}] {}", warning.code, warning.message);
            }
        }
    }
}
