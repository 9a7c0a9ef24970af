//! Message pattern lexer and parser.
//!
//! This module provides parsing for ICU message-format pattern strings. The
//! parser produces an AST that downstream formatters or tooling can consume,
//! and optionally a log of every token it lexed.

pub mod ast;
pub mod error;
mod grammar;
mod lexer;
pub mod token;

pub use ast::*;
pub use error::SyntaxError;
pub use grammar::{MAX_NESTING_DEPTH, parse, parse_value, parse_with_tokens};
pub use token::{Token, TokenKind, TokenSink};
