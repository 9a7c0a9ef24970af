//! Implementation of the `mfparse tokens` command.

use miette::{IntoDiagnostic, Report};
use mfparse::{parse_with_tokens, Token};
use serde::Serialize;

use super::input::PatternInput;
use crate::output::table::format_token_table;
use crate::output::PatternDiagnostic;

/// Arguments for the tokens command.
#[derive(Debug, clap::Args)]
pub struct TokensArgs {
    #[command(flatten)]
    pub input: PatternInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for the token log.
#[derive(Serialize)]
struct TokensJson<'a> {
    tokens: &'a [Token],
    error: Option<&'a str>,
}

/// Run the tokens command.
///
/// The token log is printed even when parsing fails, showing how far the
/// parser got before the error.
pub fn run_tokens(args: TokensArgs) -> miette::Result<i32> {
    let loaded = match args.input.load() {
        Ok(loaded) => loaded,
        Err(e) => return Ok(e.report()),
    };

    let mut tokens: Vec<Token> = Vec::new();
    let result = parse_with_tokens(&loaded.pattern, &mut tokens);

    if args.json {
        let output = TokensJson {
            tokens: &tokens,
            error: result.as_ref().err().map(|e| e.message.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", format_token_table(&tokens));
    }

    match result {
        Ok(_) => Ok(exitcode::OK),
        Err(e) => {
            if !args.json {
                let diagnostic =
                    PatternDiagnostic::from_syntax_error(&loaded.name, &loaded.pattern, &e);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            Ok(exitcode::DATAERR)
        }
    }
}
