//! Parser for ICU message-format patterns.
//!
//! A pattern such as `"{count, plural, one {# item} other {# items}}"` is
//! parsed into a [`Message`]: an ordered list of text runs, placeholders, and
//! pound signs. Parsing can optionally log every lexical token it consumes,
//! which lets tooling show exactly how far a failing parse progressed.
//!
//! # Example
//!
//! ```
//! use mfparse::{Element, Placeholder, parse};
//!
//! let message = parse("Hello, {name}!").unwrap();
//! assert_eq!(message.elements.len(), 3);
//! assert_eq!(
//!     message.elements[1],
//!     Element::Placeholder(Placeholder::Simple { id: "name".into() })
//! );
//! ```

pub mod coerce;
pub mod compact;
pub mod parser;

pub use coerce::coerce_value;
pub use compact::to_compact;
pub use parser::{
    Cases, Element, MAX_NESTING_DEPTH, Message, Placeholder, PluralKind, SyntaxError, Token,
    TokenKind, TokenSink, parse, parse_value, parse_with_tokens,
};
