//! Mode-driven cursor over a message pattern.
//!
//! The parser picks the lexing mode by calling the matching scan method:
//! [`Cursor::text`] for message text, [`Cursor::style`] for style text, and
//! the placeholder methods (`punct`, `whitespace`, `identifier`, `number`)
//! inside `{...}`. Every token is recorded in the sink before it is returned.

use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::error::END_OF_PATTERN;
use super::token::{TokenKind, TokenSink};

const OFFSET_KEYWORD: &str = "offset";
const OFFSET_PREFIX: &str = "offset:";

/// Whitespace recognized between placeholder parts.
///
/// Covers Unicode `White_Space` plus the separators some locales put in
/// patterns (U+180E, U+200B..U+200D, U+2060, U+FEFF).
pub(crate) fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{180E}' | '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

/// Characters allowed in ids, types, and selectors.
fn is_identifier_char(c: char) -> bool {
    !matches!(c, '{' | '}' | ',' | '#' | '\'') && !is_whitespace(c)
}

pub(crate) struct Cursor<'a, 's, S: ?Sized> {
    pattern: &'a str,
    rest: &'a str,
    tokens: &'s mut S,
}

impl<'a, 's, S: TokenSink + ?Sized> Cursor<'a, 's, S> {
    pub(crate) fn new(pattern: &'a str, tokens: &'s mut S) -> Self {
        Self {
            pattern,
            rest: pattern,
            tokens,
        }
    }

    pub(crate) fn pattern(&self) -> &'a str {
        self.pattern
    }

    /// Byte offset of the next unread character.
    pub(crate) fn offset(&self) -> usize {
        self.pattern.len() - self.rest.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// The first character after any whitespace, without consuming anything.
    pub(crate) fn peek_past_whitespace(&self) -> Option<char> {
        self.rest.chars().find(|&c| !is_whitespace(c))
    }

    pub(crate) fn checkpoint(&self) -> &'a str {
        self.rest
    }

    pub(crate) fn rewind(&mut self, checkpoint: &'a str) {
        self.rest = checkpoint;
    }

    /// Describes the input at the cursor for error messages.
    pub(crate) fn found(&self) -> String {
        let Some(c) = self.peek() else {
            return END_OF_PATTERN.to_string();
        };
        let end = self
            .rest
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(self.rest.len());
        match &self.rest[..end] {
            "" => c.to_string(),
            identifier => identifier.to_string(),
        }
    }

    pub(crate) fn emit(&mut self, kind: TokenKind, text: &str) {
        self.tokens.record(kind, text);
    }

    /// Consumes one syntax character and records it as `kind`.
    pub(crate) fn punct(&mut self, kind: TokenKind) {
        let start = self.rest;
        self.bump();
        let text = self.consumed_since(start);
        self.emit(kind, text);
    }

    /// Consumes a whitespace run, recording it as a `space` token.
    pub(crate) fn whitespace(&mut self) {
        let run = self.take_run(is_whitespace);
        if !run.is_empty() {
            self.emit(TokenKind::Space, run);
        }
    }

    /// Consumes an identifier and records it as `kind`. Returns `None`,
    /// consuming nothing, when no identifier starts at the cursor.
    pub(crate) fn identifier(&mut self, kind: TokenKind) -> Option<&'a str> {
        let identifier = self.take_run(is_identifier_char);
        if identifier.is_empty() {
            return None;
        }
        self.emit(kind, identifier);
        Some(identifier)
    }

    /// Consumes a decimal integer literal.
    pub(crate) fn number(&mut self) -> Option<&'a str> {
        let digits = self.take_run(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return None;
        }
        self.emit(TokenKind::Number, digits);
        Some(digits)
    }

    /// Consumes the `offset:` prefix of a plural argument, if present.
    pub(crate) fn offset_keyword(&mut self) -> bool {
        let Some(rest) = self.rest.strip_prefix(OFFSET_PREFIX) else {
            return false;
        };
        self.rest = rest;
        self.emit(TokenKind::Offset, OFFSET_KEYWORD);
        self.emit(TokenKind::Colon, ":");
        true
    }

    /// Scans message text up to the next `{`, `}`, or (with `pound`) `#`,
    /// resolving quote escapes. Records a `text` token holding the raw
    /// source when the run is non-empty.
    pub(crate) fn text(&mut self, pound: bool) -> Option<String> {
        let start = self.rest;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            match c {
                '{' | '}' => break,
                '#' if pound => break,
                '\'' => {
                    self.bump();
                    self.quoted(&mut text, |next| {
                        matches!(next, '{' | '}') || (pound && next == '#')
                    });
                }
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }
        if text.is_empty() {
            return None;
        }
        let raw = self.consumed_since(start);
        self.emit(TokenKind::Text, raw);
        Some(text)
    }

    /// Scans style text up to the next `{` or `}`, without recording it.
    ///
    /// Any quote not doubled starts an escape run. Trailing whitespace is
    /// left unconsumed. Returns the raw source and the resolved style.
    pub(crate) fn style(&mut self) -> Option<(&'a str, String)> {
        let start = self.rest;
        let mut text = String::new();
        let mut end = (self.rest, 0);
        while let Some(c) = self.peek() {
            match c {
                '{' | '}' => break,
                '\'' => {
                    self.bump();
                    self.quoted(&mut text, |_| true);
                    end = (self.rest, text.len());
                }
                _ => {
                    self.bump();
                    text.push(c);
                    if !is_whitespace(c) {
                        end = (self.rest, text.len());
                    }
                }
            }
        }
        let (rest, len) = end;
        self.rest = rest;
        text.truncate(len);
        if text.is_empty() {
            return None;
        }
        Some((self.consumed_since(start), text))
    }

    /// Resolves the input following a `'` that was just consumed.
    ///
    /// `''` is one apostrophe. A quote followed by a character accepted by
    /// `opens` copies input literally up to the next single quote (or end
    /// of input). Any other quote is literal.
    fn quoted(&mut self, text: &mut String, opens: impl Fn(char) -> bool) {
        match self.peek() {
            Some('\'') => {
                self.bump();
                text.push('\'');
            }
            Some(c) if opens(c) => {
                while let Some(c) = self.bump() {
                    if c != '\'' {
                        text.push(c);
                    } else if self.peek() == Some('\'') {
                        self.bump();
                        text.push('\'');
                    } else {
                        break;
                    }
                }
            }
            _ => text.push('\''),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let next: ModalResult<char> = any.parse_next(&mut self.rest);
        next.ok()
    }

    fn take_run(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let run: ModalResult<&'a str> = take_while(0.., predicate).parse_next(&mut self.rest);
        run.unwrap_or_default()
    }

    fn consumed_since(&self, start: &'a str) -> &'a str {
        &start[..start.len() - self.rest.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::Token;

    fn lex_text(input: &str, pound: bool) -> (Option<String>, Vec<Token>, usize) {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(input, &mut tokens);
        let text = cursor.text(pound);
        let offset = cursor.offset();
        (text, tokens, offset)
    }

    #[test]
    fn test_text_stops_at_braces() {
        let (text, tokens, offset) = lex_text("Hello, {name}", false);
        assert_eq!(text.as_deref(), Some("Hello, "));
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, "Hello, ")]);
        assert_eq!(offset, 7);
    }

    #[test]
    fn test_pound_only_stops_in_plural_context() {
        assert_eq!(lex_text("a#b", false).0.as_deref(), Some("a#b"));
        assert_eq!(lex_text("a#b", true).0.as_deref(), Some("a"));
    }

    #[test]
    fn test_quote_before_ordinary_character_is_literal() {
        assert_eq!(lex_text("I'm here", false).0.as_deref(), Some("I'm here"));
    }

    #[test]
    fn test_quote_escapes_pound_only_in_plural_context() {
        assert_eq!(lex_text("'#'", true).0.as_deref(), Some("#"));
        assert_eq!(lex_text("'#'", false).0.as_deref(), Some("'#'"));
    }

    #[test]
    fn test_unterminated_escape_runs_to_end() {
        let (text, tokens, _) = lex_text("'{a}b", false);
        assert_eq!(text.as_deref(), Some("{a}b"));
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, "'{a}b")]);
    }

    #[test]
    fn test_doubled_quote_inside_escape_run() {
        assert_eq!(lex_text("'{it''s}'", false).0.as_deref(), Some("{it's}"));
    }

    #[test]
    fn test_empty_text_records_nothing() {
        let (text, tokens, offset) = lex_text("{x}", false);
        assert_eq!(text, None);
        assert!(tokens.is_empty());
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_style_leaves_trailing_whitespace() {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new("short  long  }", &mut tokens);
        let (raw, style) = cursor.style().unwrap();
        assert_eq!(raw, "short  long");
        assert_eq!(style, "short  long");
        assert_eq!(cursor.peek(), Some(' '));
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_style_quote_always_escapes() {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new("'a {b}' }", &mut tokens);
        let (raw, style) = cursor.style().unwrap();
        assert_eq!(raw, "'a {b}'");
        assert_eq!(style, "a {b}");
    }

    #[test]
    fn test_identifier_accepts_punctuation() {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new("<0/>,", &mut tokens);
        assert_eq!(cursor.identifier(TokenKind::Id), Some("<0/>"));
        assert_eq!(cursor.peek(), Some(','));
    }

    #[test]
    fn test_whitespace_includes_format_separators() {
        for c in ['\u{0085}', '\u{00A0}', '\u{180E}', '\u{2060}', '\u{3000}', '\u{FEFF}'] {
            assert!(is_whitespace(c), "{c:?} should be whitespace");
        }
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn test_found_prefers_identifier() {
        let mut tokens = Vec::new();
        let cursor = Cursor::new("abc}", &mut tokens);
        assert_eq!(cursor.found(), "abc");
        let mut tokens = Vec::new();
        let cursor = Cursor::new("", &mut tokens);
        assert_eq!(cursor.found(), END_OF_PATTERN);
    }
}
