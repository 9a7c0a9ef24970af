//! Token log types.

use std::fmt;

use serde::{Serialize, Serializer};

/// The lexical class of a logged token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of message text (raw source, quotes included).
    Text,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `,`
    Comma,
    /// `:` following the `offset` keyword.
    Colon,
    /// The placeholder argument name.
    Id,
    /// The placeholder argument type (`number`, `plural`, ...).
    Type,
    /// The style text of a typed placeholder.
    Style,
    /// A sub-message selector (`=0`, `one`, `other`, ...).
    Selector,
    /// The `offset` keyword of a plural argument.
    Offset,
    /// The decimal offset value.
    Number,
    /// A run of whitespace inside a placeholder.
    Space,
    /// A `#` standing for the plural value.
    Pound,
}

impl TokenKind {
    /// The name tooling uses for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Id => "id",
            Self::Type => "type",
            Self::Style => "style",
            Self::Selector => "selector",
            Self::Offset => "offset",
            Self::Number => "number",
            Self::Space => "space",
            Self::Pound => "#",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One lexical unit consumed by the parser, with its raw source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A caller-owned destination for the token log.
///
/// Tokens are recorded in source order as they are lexed, including the
/// tokens lexed before a syntax error.
pub trait TokenSink {
    fn record(&mut self, kind: TokenKind, text: &str);
}

impl TokenSink for Vec<Token> {
    fn record(&mut self, kind: TokenKind, text: &str) {
        self.push(Token::new(kind, text));
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn record(&mut self, kind: TokenKind, text: &str) {
        (**self).record(kind, text);
    }
}

/// Sink used when the caller does not want a token log.
pub(crate) struct Discard;

impl TokenSink for Discard {
    #[inline]
    fn record(&mut self, _kind: TokenKind, _text: &str) {}
}
