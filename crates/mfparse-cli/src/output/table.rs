//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use mfparse::Token;

/// Format a token log as an ASCII table.
pub fn format_token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Kind", "Text"]);

    for (index, token) in tokens.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            token.kind.to_string(),
            format!("{:?}", token.text),
        ]);
    }

    table
}
