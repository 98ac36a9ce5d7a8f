//! Attribute escaping
//!
//! Escapes text the way the backup format expects: the five reserved XML
//! characters become named entities, and every code point outside
//! `U+0020..=U+D7FF` becomes a decimal character reference.

use std::borrow::Cow;
use std::fmt::Write;

const ENTITIES: [(&str, &str); 5] = [
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&apos;"),
];

fn in_safe_band(c: char) -> bool {
    ('\u{20}'..='\u{D7FF}').contains(&c)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'') || !in_safe_band(c)
}

/// Escape `s` for use inside a double or single quoted attribute value
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    // Ampersand goes first so later entities are not escaped twice.
    let mut entity_escaped = s.to_string();
    for (raw, entity) in ENTITIES {
        entity_escaped = entity_escaped.replace(raw, entity);
    }

    let mut escaped = String::with_capacity(entity_escaped.len());
    for c in entity_escaped.chars() {
        if in_safe_band(c) {
            escaped.push(c);
        } else {
            let _ = write!(escaped, "&#{};", c as u32);
        }
    }

    Cow::Owned(escaped)
}
