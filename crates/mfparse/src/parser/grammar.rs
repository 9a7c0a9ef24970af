//! Recursive-descent productions for message patterns.
//!
//! One method per production: message, placeholder, plural, sub-messages,
//! sub-message, and style. Recursion depth follows placeholder nesting.

use serde_json::Value;
use tracing::{debug, trace};

use super::ast::{Cases, Element, Message, OTHER, Placeholder, PluralKind};
use super::error::SyntaxError;
use super::lexer::Cursor;
use super::token::{Discard, TokenKind, TokenSink};
use crate::coerce::coerce_value;

/// Argument types whose third part is always style text.
const STYLED_TYPES: [&str; 6] = ["number", "date", "time", "ordinal", "duration", "spellout"];

/// Deepest sub-message nesting accepted before the parse is rejected.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse a message pattern into an AST.
pub fn parse(pattern: &str) -> Result<Message, SyntaxError> {
    parse_with_tokens(pattern, &mut Discard)
}

/// Parse a message pattern, recording every lexed token in `tokens`.
///
/// Tokens lexed before a syntax error stay in the sink.
pub fn parse_with_tokens<S: TokenSink + ?Sized>(
    pattern: &str,
    tokens: &mut S,
) -> Result<Message, SyntaxError> {
    trace!(len = pattern.len(), "parsing message pattern");
    Parser::new(pattern, tokens).parse().inspect_err(|err| {
        debug!(offset = err.offset, error = %err.message, "message pattern rejected");
    })
}

/// Parse any JSON value after coercing it to its string form.
///
/// `None` stands for an absent value and parses as `"undefined"`.
pub fn parse_value(
    value: Option<&Value>,
    tokens: Option<&mut dyn TokenSink>,
) -> Result<Message, SyntaxError> {
    let pattern = coerce_value(value);
    match tokens {
        Some(tokens) => parse_with_tokens(&pattern, tokens),
        None => parse(&pattern),
    }
}

/// Where a message body sits, which decides how `}` and `#` behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// The whole pattern: a `}` is an error.
    Root,
    /// A plural or selectordinal case: `#` is a pound sign.
    Plural,
    /// A select or custom case.
    Plain,
}

/// The argument type of a placeholder, classified.
enum ArgType<'a> {
    Plural(PluralKind),
    Select,
    Styled(&'a str),
    Custom(&'a str),
}

impl<'a> ArgType<'a> {
    fn classify(name: &'a str) -> Self {
        match name {
            "plural" => Self::Plural(PluralKind::Plural),
            "selectordinal" => Self::Plural(PluralKind::SelectOrdinal),
            "select" => Self::Select,
            _ if STYLED_TYPES.contains(&name) => Self::Styled(name),
            _ => Self::Custom(name),
        }
    }

    /// The construct name of types that require sub-messages.
    fn sub_message_construct(&self) -> Option<&'static str> {
        match self {
            Self::Plural(kind) => Some(kind.as_str()),
            Self::Select => Some("select"),
            Self::Styled(_) | Self::Custom(_) => None,
        }
    }
}

struct Parser<'a, 's, S: ?Sized> {
    cursor: Cursor<'a, 's, S>,
    depth: usize,
}

impl<'a, 's, S: TokenSink + ?Sized> Parser<'a, 's, S> {
    fn new(pattern: &'a str, tokens: &'s mut S) -> Self {
        Self {
            cursor: Cursor::new(pattern, tokens),
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Message, SyntaxError> {
        self.message(Context::Root)
    }

    /// Text, placeholders, and pound signs up to a `}` or the end of input.
    fn message(&mut self, context: Context) -> Result<Message, SyntaxError> {
        let mut elements = Vec::new();
        loop {
            if let Some(text) = self.cursor.text(context == Context::Plural) {
                elements.push(Element::Text(text));
            }
            match self.cursor.peek() {
                None => break,
                Some('}') if context == Context::Root => return Err(self.unexpected()),
                Some('}') => break,
                Some('#') => {
                    self.cursor.punct(TokenKind::Pound);
                    elements.push(Element::PoundSign);
                }
                Some(_) => elements.push(Element::Placeholder(self.placeholder()?)),
            }
        }
        Ok(Message::new(elements))
    }

    /// A `{...}` argument; the cursor is on the opening brace.
    fn placeholder(&mut self) -> Result<Placeholder, SyntaxError> {
        self.cursor.punct(TokenKind::OpenBrace);
        self.cursor.whitespace();

        let id = self
            .cursor
            .identifier(TokenKind::Id)
            .ok_or_else(|| self.expected("placeholder id"))?
            .to_string();
        self.cursor.whitespace();

        match self.cursor.peek() {
            Some('}') => {
                self.cursor.punct(TokenKind::CloseBrace);
                return Ok(Placeholder::Simple { id });
            }
            Some(',') => self.cursor.punct(TokenKind::Comma),
            _ => return Err(self.expected(", or }")),
        }
        self.cursor.whitespace();

        let name = self
            .cursor
            .identifier(TokenKind::Type)
            .ok_or_else(|| self.expected("placeholder type"))?;
        let arg_type = ArgType::classify(name);
        self.cursor.whitespace();

        match self.cursor.peek() {
            Some('}') => {
                if let Some(construct) = arg_type.sub_message_construct() {
                    self.cursor.emit(TokenKind::CloseBrace, "}");
                    return Err(self.expected(&format!("{construct} sub-messages")));
                }
                self.cursor.punct(TokenKind::CloseBrace);
                return Ok(Placeholder::Typed {
                    id,
                    arg_type: name.to_string(),
                    style: None,
                });
            }
            Some(',') => self.cursor.punct(TokenKind::Comma),
            _ => return Err(self.expected(", or }")),
        }
        self.cursor.whitespace();

        let placeholder = match arg_type {
            ArgType::Plural(kind) => self.plural(id, kind)?,
            ArgType::Select => Placeholder::Select {
                id,
                cases: self.sub_messages(Context::Plain, Some("select"))?,
            },
            ArgType::Styled(name) => Placeholder::Typed {
                id,
                arg_type: name.to_string(),
                style: Some(self.style()?),
            },
            ArgType::Custom(name) => self.custom(id, name)?,
        };

        self.cursor.whitespace();
        if self.cursor.peek() != Some('}') {
            return Err(self.expected("}"));
        }
        self.cursor.punct(TokenKind::CloseBrace);
        Ok(placeholder)
    }

    /// The `[offset:N] cases` remainder of a plural or selectordinal argument.
    fn plural(&mut self, id: String, kind: PluralKind) -> Result<Placeholder, SyntaxError> {
        let offset = self.offset()?;
        self.cursor.whitespace();
        let cases = self.sub_messages(Context::Plural, Some(kind.as_str()))?;
        Ok(Placeholder::Plural {
            id,
            kind,
            offset,
            cases,
        })
    }

    fn offset(&mut self) -> Result<u64, SyntaxError> {
        if !self.cursor.offset_keyword() {
            return Ok(0);
        }
        self.cursor.whitespace();
        let start = self.cursor.offset();
        let digits = self
            .cursor
            .number()
            .ok_or_else(|| self.expected("offset number"))?;
        digits.parse().map_err(|_| {
            SyntaxError::expected(
                self.cursor.pattern(),
                start,
                "offset number",
                digits.to_string(),
            )
        })
    }

    /// Style text of a custom type, or its sub-messages when the text is
    /// directly followed by `{`.
    fn custom(&mut self, id: String, name: &str) -> Result<Placeholder, SyntaxError> {
        let checkpoint = self.cursor.checkpoint();
        let (raw, style) = self
            .cursor
            .style()
            .ok_or_else(|| self.expected("placeholder style name"))?;

        if self.cursor.peek_past_whitespace() == Some('{') {
            self.cursor.rewind(checkpoint);
            let cases = self.sub_messages(Context::Plain, None)?;
            return Ok(Placeholder::Custom {
                id,
                arg_type: name.to_string(),
                cases,
            });
        }

        self.cursor.emit(TokenKind::Style, raw);
        Ok(Placeholder::Typed {
            id,
            arg_type: name.to_string(),
            style: Some(style),
        })
    }

    fn style(&mut self) -> Result<String, SyntaxError> {
        let (raw, style) = self
            .cursor
            .style()
            .ok_or_else(|| self.expected("placeholder style name"))?;
        self.cursor.emit(TokenKind::Style, raw);
        Ok(style)
    }

    /// `selector {message}` pairs up to the closing brace of the argument.
    ///
    /// `construct` names the argument type when an `other` case is required.
    fn sub_messages(
        &mut self,
        context: Context,
        construct: Option<&str>,
    ) -> Result<Cases, SyntaxError> {
        let mut cases = Cases::new();
        while !matches!(self.cursor.peek(), None | Some('}')) {
            let selector = self
                .cursor
                .identifier(TokenKind::Selector)
                .ok_or_else(|| self.expected("sub-message selector"))?;
            self.cursor.whitespace();
            let message = self.sub_message(context)?;
            cases.insert(selector, message);
            self.cursor.whitespace();
        }

        let missing_other = construct.filter(|_| !cases.contains(OTHER));
        if let Some(construct) = missing_other {
            return Err(SyntaxError::missing_other(
                self.cursor.pattern(),
                self.cursor.offset(),
                construct,
                self.cursor.found(),
            ));
        }
        Ok(cases)
    }

    fn sub_message(&mut self, context: Context) -> Result<Message, SyntaxError> {
        if self.cursor.peek() != Some('{') {
            return Err(self.expected("{ to start sub-message"));
        }
        if self.depth == MAX_NESTING_DEPTH {
            return Err(SyntaxError::too_deep(
                self.cursor.pattern(),
                self.cursor.offset(),
                MAX_NESTING_DEPTH,
                self.cursor.found(),
            ));
        }
        self.cursor.punct(TokenKind::OpenBrace);
        self.depth += 1;
        let message = self.message(context)?;
        self.depth -= 1;
        if self.cursor.peek() != Some('}') {
            return Err(self.expected("} to end sub-message"));
        }
        self.cursor.punct(TokenKind::CloseBrace);
        Ok(message)
    }

    fn expected(&self, expected: &str) -> SyntaxError {
        SyntaxError::expected(
            self.cursor.pattern(),
            self.cursor.offset(),
            expected,
            self.cursor.found(),
        )
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::unexpected(
            self.cursor.pattern(),
            self.cursor.offset(),
            self.cursor.found(),
        )
    }
}
