//! Public AST types for message patterns.
//!
//! These types are public so that formatters, translators, and linters can
//! consume a parsed pattern without re-parsing it.

use std::mem;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The selector every plural, selectordinal, and select argument must define.
pub const OTHER: &str = "other";

/// A parsed message: the root pattern or the body of one sub-message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message {
    pub elements: Vec<Element>,
}

impl Message {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Concatenation of all `Text` elements, ignoring placeholders.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Text(text) => Some(text.as_str()),
                Element::Placeholder(_) | Element::PoundSign => None,
            })
            .collect()
    }
}

/// An element within a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Literal text with quote escapes resolved.
    Text(String),
    /// A `{...}` argument.
    Placeholder(Placeholder),
    /// A bare `#` inside a plural or selectordinal case.
    PoundSign,
}

/// A `{...}` argument, distinguished by shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `{id}`
    Simple { id: String },
    /// `{id, type}` or `{id, type, style}`
    Typed {
        id: String,
        arg_type: String,
        style: Option<String>,
    },
    /// `{id, plural, ...}` or `{id, selectordinal, ...}`
    Plural {
        id: String,
        kind: PluralKind,
        offset: u64,
        cases: Cases,
    },
    /// `{id, select, ...}`
    Select { id: String, cases: Cases },
    /// A custom argument type followed by sub-messages, e.g. `{a, <, >{click}}`.
    Custom {
        id: String,
        arg_type: String,
        cases: Cases,
    },
}

impl Placeholder {
    /// The argument name.
    pub fn id(&self) -> &str {
        match self {
            Self::Simple { id }
            | Self::Typed { id, .. }
            | Self::Plural { id, .. }
            | Self::Select { id, .. }
            | Self::Custom { id, .. } => id,
        }
    }

    /// The argument type as written in the pattern, if any.
    pub fn arg_type(&self) -> Option<&str> {
        match self {
            Self::Simple { .. } => None,
            Self::Typed { arg_type, .. } | Self::Custom { arg_type, .. } => Some(arg_type),
            Self::Plural { kind, .. } => Some(kind.as_str()),
            Self::Select { .. } => Some("select"),
        }
    }

    /// The sub-messages of a plural, select, or custom argument.
    pub fn cases(&self) -> Option<&Cases> {
        match self {
            Self::Plural { cases, .. } | Self::Select { cases, .. } | Self::Custom { cases, .. } => {
                Some(cases)
            }
            Self::Simple { .. } | Self::Typed { .. } => None,
        }
    }
}

/// Which plural rule set a plural argument selects with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralKind {
    /// Cardinal plural rules (`plural`).
    Plural,
    /// Ordinal plural rules (`selectordinal`).
    SelectOrdinal,
}

impl PluralKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plural => "plural",
            Self::SelectOrdinal => "selectordinal",
        }
    }
}

/// Sub-messages keyed by selector, in source order.
///
/// Inserting a selector that is already present replaces its message but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cases {
    entries: Vec<(String, Message)>,
}

impl Cases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a case, returning the message it replaced.
    pub fn insert(&mut self, selector: impl Into<String>, message: Message) -> Option<Message> {
        let selector = selector.into();
        match self.entries.iter_mut().find(|(key, _)| *key == selector) {
            Some((_, existing)) => Some(mem::replace(existing, message)),
            None => {
                self.entries.push((selector, message));
                None
            }
        }
    }

    pub fn get(&self, selector: &str) -> Option<&Message> {
        self.entries
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, message)| message)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.get(selector).is_some()
    }

    /// The mandatory `other` case.
    pub fn other(&self) -> Option<&Message> {
        self.get(OTHER)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.entries
            .iter()
            .map(|(key, message)| (key.as_str(), message))
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, Message)> for Cases {
    fn from_iter<I: IntoIterator<Item = (S, Message)>>(iter: I) -> Self {
        let mut cases = Self::new();
        for (selector, message) in iter {
            cases.insert(selector, message);
        }
        cases
    }
}

impl Serialize for Cases {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (selector, message) in &self.entries {
            map.serialize_entry(selector, message)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Message {
        Message::new(vec![Element::Text(value.into())])
    }

    #[test]
    fn test_insert_preserves_source_order() {
        let mut cases = Cases::new();
        cases.insert("=0", text("none"));
        cases.insert("one", text("single"));
        cases.insert("other", text("many"));
        assert_eq!(cases.selectors().collect::<Vec<_>>(), ["=0", "one", "other"]);
    }

    #[test]
    fn test_repeated_selector_replaces_in_place() {
        let mut cases = Cases::new();
        cases.insert("one", text("first"));
        cases.insert("other", text("rest"));
        let replaced = cases.insert("one", text("second"));
        assert_eq!(replaced, Some(text("first")));
        assert_eq!(cases.selectors().collect::<Vec<_>>(), ["one", "other"]);
        assert_eq!(cases.get("one"), Some(&text("second")));
    }

    #[test]
    fn test_other_lookup() {
        let cases: Cases = [("male", text("he")), ("other", text("they"))]
            .into_iter()
            .collect();
        assert_eq!(cases.other(), Some(&text("they")));
        assert!(!cases.contains("female"));
    }

    #[test]
    fn test_message_text_skips_placeholders() {
        let message = Message::new(vec![
            Element::Text("a".into()),
            Element::PoundSign,
            Element::Placeholder(Placeholder::Simple { id: "x".into() }),
            Element::Text("b".into()),
        ]);
        assert_eq!(message.text(), "ab");
    }
}
