//! Compact nested-array JSON encoding of parsed messages.
//!
//! This is the shape JavaScript message formatters conventionally consume:
//!
//! - text is a string,
//! - `{id}` is `[id]`,
//! - `{id, type}` is `[id, type]` and `{id, type, style}` is `[id, type, style]`,
//! - plural arguments are `[id, kind, offset, {selector: message}]`,
//! - select and custom arguments are `[id, type, {selector: message}]`,
//! - a pound sign is `["#"]`.

use serde_json::{Map, Value, json};

use crate::parser::{Cases, Element, Message, Placeholder};

/// Encodes a message as a JSON array of elements.
pub fn to_compact(message: &Message) -> Value {
    Value::Array(message.elements.iter().map(element).collect())
}

fn element(element: &Element) -> Value {
    match element {
        Element::Text(text) => Value::String(text.clone()),
        Element::PoundSign => json!(["#"]),
        Element::Placeholder(placeholder) => match placeholder {
            Placeholder::Simple { id } => json!([id]),
            Placeholder::Typed {
                id,
                arg_type,
                style: None,
            } => json!([id, arg_type]),
            Placeholder::Typed {
                id,
                arg_type,
                style: Some(style),
            } => json!([id, arg_type, style]),
            Placeholder::Plural {
                id,
                kind,
                offset,
                cases,
            } => json!([id, kind.as_str(), offset, cases_object(cases)]),
            Placeholder::Select { id, cases } => json!([id, "select", cases_object(cases)]),
            Placeholder::Custom {
                id,
                arg_type,
                cases,
            } => json!([id, arg_type, cases_object(cases)]),
        },
    }
}

fn cases_object(cases: &Cases) -> Value {
    let map: Map<String, Value> = cases
        .iter()
        .map(|(selector, message)| (selector.to_string(), to_compact(message)))
        .collect();
    Value::Object(map)
}
