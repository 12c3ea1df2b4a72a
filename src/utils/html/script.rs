//! Locating `<script>` start tags in raw HTML.
//!
//! A single forward pass over the bytes that follows the tokenizer rules
//! relevant to finding scripts: comments, quoted and unquoted attribute
//! values, case-insensitive names, and raw text elements whose content is
//! never markup. Positions are byte ranges into the input so edits can be
//! spliced back without re-serializing the document.

use std::ops::Range;

/// Elements whose content runs as plain text up to the matching end tag.
const RAW_TEXT: [&[u8]; 8] = [
    b"script",
    b"style",
    b"textarea",
    b"title",
    b"xmp",
    b"iframe",
    b"noembed",
    b"noframes",
];

/// A `<script>` start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    /// `<script` through the closing `>`
    pub span: Range<usize>,
    /// Raw value of the first `src` attribute, empty for a bare `src`
    pub src: Option<Range<usize>>,
}

/// Every `<script>` start tag in `html`, in document order.
pub fn script_tags(html: &str) -> Vec<ScriptTag> {
    let bytes = html.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'<') {
        let lt = pos + offset;
        let rest = &bytes[lt + 1..];

        pos = match rest.first() {
            Some(b'!') if rest.starts_with(b"!--") => skip_comment(bytes, lt + 4),
            Some(b'!' | b'?') => skip_past(bytes, lt + 1, b'>'),
            Some(b'/') if rest.get(1).is_some_and(u8::is_ascii_alphabetic) => {
                skip_past(bytes, lt + 2, b'>')
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name_end = scan(bytes, lt + 1, |b| !is_space(b) && b != b'/' && b != b'>');
                let name = &bytes[lt + 1..name_end];
                let (end, src) = lex_attributes(bytes, name_end);

                if name.eq_ignore_ascii_case(b"script") {
                    tags.push(ScriptTag { span: lt..end, src });
                }
                match RAW_TEXT.iter().find(|raw| name.eq_ignore_ascii_case(raw)) {
                    Some(raw) => find_end_tag(bytes, end, raw),
                    None => end,
                }
            }
            // A lone `<` in text
            _ => lt + 1,
        };
    }

    tags
}

/// Walk a start tag's attributes from `i`.
///
/// Returns the index just past `>` (or the input length) and the value range
/// of the first `src` attribute.
fn lex_attributes(bytes: &[u8], mut i: usize) -> (usize, Option<Range<usize>>) {
    let mut src = None;

    loop {
        i = scan(bytes, i, |b| is_space(b) || b == b'/');
        match bytes.get(i) {
            None => return (bytes.len(), src),
            Some(b'>') => return (i + 1, src),
            Some(_) => {}
        }

        // A leading `=` is part of the name
        let name_start = i;
        i = scan(bytes, i + 1, |b| !is_space(b) && !matches!(b, b'/' | b'>' | b'='));
        let name = &bytes[name_start..i];

        let after_name = scan(bytes, i, is_space);
        let value = if bytes.get(after_name) == Some(&b'=') {
            let start = scan(bytes, after_name + 1, is_space);
            match bytes.get(start) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let end = scan(bytes, start + 1, |b| b != quote);
                    i = (end + 1).min(bytes.len());
                    start + 1..end
                }
                _ => {
                    i = scan(bytes, start, |b| !is_space(b) && b != b'>');
                    start..i
                }
            }
        } else {
            i..i
        };

        if src.is_none() && name.eq_ignore_ascii_case(b"src") {
            src = Some(value);
        }
    }
}

/// Start of the end tag `</name` at or after `from`, or the input length.
fn find_end_tag(bytes: &[u8], from: usize, name: &[u8]) -> usize {
    let mut i = from;
    while let Some(offset) = bytes[i..].windows(2).position(|w| w == b"</") {
        let lt = i + offset;
        let after = lt + 2 + name.len();
        let is_match = bytes
            .get(lt + 2..after)
            .is_some_and(|n| n.eq_ignore_ascii_case(name))
            && bytes
                .get(after)
                .is_none_or(|&b| is_space(b) || b == b'/' || b == b'>');
        if is_match {
            return lt;
        }
        i = lt + 2;
    }
    bytes.len()
}

fn skip_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .windows(3)
        .position(|w| w == b"-->")
        .map_or(bytes.len(), |n| from + n + 3)
}

fn skip_past(bytes: &[u8], from: usize, needle: u8) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == needle)
        .map_or(bytes.len(), |n| from + n + 1)
}

/// First index at or after `from` where `pred` fails.
fn scan(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !pred(b))
        .map_or(bytes.len(), |n| from + n)
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}
