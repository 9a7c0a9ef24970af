//! Miette diagnostic wrapper for pattern syntax errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use mfparse::SyntaxError;
use thiserror::Error;

/// A miette-compatible diagnostic for pattern syntax errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(mfparse::syntax))]
pub struct PatternDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,

    label: String,

    #[help]
    help: Option<String>,
}

impl PatternDiagnostic {
    /// Create a diagnostic from a SyntaxError with source context.
    pub fn from_syntax_error(name: &str, pattern: &str, err: &SyntaxError) -> Self {
        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = err.offset.min(pattern.len());
        let length = if err.is_end_of_pattern() {
            0
        } else {
            err.found.len().min(pattern.len() - offset)
        };

        let label = match &err.expected {
            Some(expected) => format!("expected {expected}"),
            None => "here".to_string(),
        };

        PatternDiagnostic {
            src: NamedSource::new(name, pattern.to_string()),
            span: (offset, length).into(),
            message: err.message.clone(),
            label,
            help: help_for(err),
        }
    }
}

fn help_for(err: &SyntaxError) -> Option<String> {
    if err.message.starts_with("\"other\"") {
        return Some("add an `other {...}` case; it is used when no other selector matches".into());
    }
    if err.expected.is_none() && err.found == "}" {
        return Some("quote literal braces, e.g. '}'".into());
    }
    None
}
