//! mfparse CLI entry point.
//!
//! Provides command-line tools for working with ICU message patterns:
//! - `mfparse parse` - Print the AST of a pattern as JSON
//! - `mfparse tokens` - Print the token log of a pattern
//! - `mfparse check` - Validate every pattern in JSON message catalogs

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_parse, run_tokens, CheckArgs, ParseArgs, TokensArgs};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// ICU message pattern tools.
#[derive(Debug, Parser)]
#[command(name = "mfparse")]
#[command(about = "ICU message pattern tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true, env = "MFPARSE_COLOR")]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a pattern and print its AST as JSON
    Parse(ParseArgs),
    /// Print the tokens lexed from a pattern
    Tokens(TokensArgs),
    /// Check every pattern in JSON message catalogs
    Check(CheckArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set and by verbosity otherwise.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Tokens(args) => run_tokens(args),
        Commands::Check(args) => run_check(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
