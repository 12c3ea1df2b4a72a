//! HTML text helpers for attribute rewriting.
//!
//! - [`script`]: locate `<script>` start tags and their `src` values
//! - `escape_attr()` - entity-escape a value before splicing it into markup
//! - `unescape()` - decode the entities a raw attribute value may carry

pub mod script;

use std::borrow::Cow;

pub use script::script_tags;

/// Get the HTML entity for a character that is special inside attributes.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an attribute value.
///
/// Safe for double-quoted, single-quoted and unquoted contexts as long as the
/// value has no whitespace. Borrows when nothing needs escaping.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| escape_char(c).is_some()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Unescape HTML entities back to characters.
///
/// Handles the named entities `escape_attr` produces plus numeric references.
/// Unknown entities are kept verbatim.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities longer than this are not worth decoding
        let Some(semi) = tail.bytes().take(12).position(|b| b == b';') else {
            result.push('&');
            rest = &tail[1..];
            continue;
        };

        match decode_entity(&tail[1..semi]) {
            Some(c) => result.push(c),
            None => result.push_str(&tail[..=semi]),
        }
        rest = &tail[semi + 1..];
    }

    result.push_str(rest);
    Cow::Owned(result)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.and_then(char::from_u32)
        }
    }
}
