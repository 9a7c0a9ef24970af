//! Implementation of the `mfparse parse` command.

use miette::{IntoDiagnostic, Report};
use mfparse::{parse, to_compact};
use tracing::debug;

use super::input::PatternInput;
use crate::output::PatternDiagnostic;

/// Arguments for the parse command.
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: PatternInput,

    /// Print the compact nested-array encoding instead of the full AST
    #[arg(long)]
    pub compact: bool,
}

/// Run the parse command.
pub fn run_parse(args: ParseArgs) -> miette::Result<i32> {
    let loaded = match args.input.load() {
        Ok(loaded) => loaded,
        Err(e) => return Ok(e.report()),
    };
    debug!(source = %loaded.name, len = loaded.pattern.len(), "parsing pattern");

    match parse(&loaded.pattern) {
        Ok(message) => {
            let json = if args.compact {
                to_compact(&message)
            } else {
                serde_json::to_value(&message).into_diagnostic()?
            };
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
            Ok(exitcode::OK)
        }
        Err(e) => {
            let diagnostic = PatternDiagnostic::from_syntax_error(&loaded.name, &loaded.pattern, &e);
            eprintln!("{:?}", Report::new(diagnostic));
            Ok(exitcode::DATAERR)
        }
    }
}
