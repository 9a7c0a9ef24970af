//! Pattern input shared by the `parse` and `tokens` commands.

use std::fs::read_to_string;
use std::io::{self, stdin, ErrorKind, Read};
use std::path::PathBuf;

use miette::{Diagnostic, Report};
use mfparse::coerce_value;
use serde_json::Value;
use thiserror::Error;

/// Where to read a pattern from.
#[derive(Debug, clap::Args)]
pub struct PatternInput {
    /// Pattern to parse. Read from stdin when neither this nor --file is given.
    pub pattern: Option<String>,

    /// Read the pattern from a file
    #[arg(short, long, conflicts_with = "pattern")]
    pub file: Option<PathBuf>,

    /// Treat the input as a JSON value and coerce it to a pattern string
    #[arg(long)]
    pub json_value: bool,
}

/// A pattern ready for parsing, with a name for diagnostics.
pub struct LoadedPattern {
    pub name: String,
    pub pattern: String,
}

/// Failure to obtain a pattern.
#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("cannot read {}", path.display())]
    #[diagnostic(code(mfparse::io))]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read pattern from stdin")]
    #[diagnostic(code(mfparse::io))]
    Stdin(#[source] io::Error),

    #[error("input is not valid JSON")]
    #[diagnostic(
        code(mfparse::json),
        help("drop --json-value to parse the input as a plain pattern")
    )]
    Json(#[source] serde_json::Error),
}

impl InputError {
    pub fn exit_code(&self) -> i32 {
        match self {
            InputError::File { source, .. } if source.kind() == ErrorKind::NotFound => {
                exitcode::NOINPUT
            }
            InputError::File { .. } | InputError::Stdin(_) => exitcode::IOERR,
            InputError::Json(_) => exitcode::DATAERR,
        }
    }

    /// Print the error as a report and return the matching exit code.
    pub fn report(self) -> i32 {
        let code = self.exit_code();
        eprintln!("{:?}", Report::new(self));
        code
    }
}

impl PatternInput {
    pub fn load(&self) -> Result<LoadedPattern, InputError> {
        let (name, raw) = match (&self.pattern, &self.file) {
            (Some(pattern), _) => ("<argument>".to_string(), pattern.clone()),
            (None, Some(path)) => {
                let raw = read_to_string(path).map_err(|source| InputError::File {
                    path: path.clone(),
                    source,
                })?;
                (path.display().to_string(), strip_line_ending(raw))
            }
            (None, None) => {
                let mut raw = String::new();
                stdin()
                    .read_to_string(&mut raw)
                    .map_err(InputError::Stdin)?;
                ("<stdin>".to_string(), strip_line_ending(raw))
            }
        };

        let pattern = if self.json_value {
            let value: Value = serde_json::from_str(&raw).map_err(InputError::Json)?;
            coerce_value(Some(&value))
        } else {
            raw
        };
        Ok(LoadedPattern { name, pattern })
    }
}

/// Drops the final newline editors and shells append to files and pipes.
fn strip_line_ending(mut raw: String) -> String {
    if raw.ends_with('\n') {
        raw.pop();
        if raw.ends_with('\r') {
            raw.pop();
        }
    }
    raw
}
