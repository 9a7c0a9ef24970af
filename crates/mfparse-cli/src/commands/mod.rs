//! CLI command implementations.

mod check;
mod input;
mod parse;
mod tokens;

pub use check::{run_check, CheckArgs};
pub use parse::{run_parse, ParseArgs};
pub use tokens::{run_tokens, TokensArgs};
