//! Implementation of the `mfparse check` command.
//!
//! A catalog is a JSON object mapping message keys to patterns. Values that
//! are not strings are coerced the same way `parse --json-value` does.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Report, Result};
use mfparse::{coerce_value, parse_value, SyntaxError};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::output::PatternDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Message catalogs to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one rejected pattern.
#[derive(Debug, Serialize)]
struct FailureJson {
    file: String,
    key: String,
    message: String,
    line: usize,
    column: usize,
}

/// A pattern that failed to parse.
struct Failure {
    file: String,
    key: String,
    pattern: String,
    error: SyntaxError,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut failures: Vec<Failure> = Vec::new();
    let mut checked = 0;

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read catalog {:?}: {}", path, e))?;
        let catalog: Map<String, Value> = serde_json::from_str(&content)
            .into_diagnostic()
            .map_err(|e| miette!("Catalog {:?} is not a JSON object: {}", path, e))?;
        debug!(file = %path.display(), messages = catalog.len(), "checking catalog");

        for (key, value) in &catalog {
            checked += 1;
            if let Err(error) = parse_value(Some(value), None) {
                failures.push(Failure {
                    file: path.display().to_string(),
                    key: key.clone(),
                    pattern: coerce_value(Some(value)),
                    error,
                });
            }
        }
    }
    info!(checked, failed = failures.len(), "check finished");

    if args.json {
        let json_data: Vec<FailureJson> = failures
            .iter()
            .map(|f| FailureJson {
                file: f.file.clone(),
                key: f.key.clone(),
                message: f.error.message.clone(),
                line: f.error.line,
                column: f.error.column,
            })
            .collect();
        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        for failure in &failures {
            let name = format!("{} [{}]", failure.file, failure.key);
            let diagnostic =
                PatternDiagnostic::from_syntax_error(&name, &failure.pattern, &failure.error);
            eprintln!("{:?}", Report::new(diagnostic));
        }

        let summary = format!(
            "checked {} message(s) in {} file(s), {} with errors",
            checked,
            args.files.len(),
            failures.len()
        );
        if failures.is_empty() {
            println!("{}", summary.if_supports_color(Stream::Stdout, |s| s.green()));
        } else {
            println!("{}", summary.if_supports_color(Stream::Stdout, |s| s.red()));
        }
    }

    if failures.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

