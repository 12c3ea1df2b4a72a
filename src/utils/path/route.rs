//! Script URL processing.
//!
//! Locations are handled as lists of segments relative to the output root.
//! A location may start with `..` segments when a reference climbs above the
//! root; everything stays lexical, nothing touches the filesystem.

use std::iter;

/// How a `<script src>` value is treated during relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrcKind {
    /// Starts with `.` (`./main.js`, `../lib.js`)
    Relative,
    /// Starts with a single `/` (`/shared/lib.js`)
    Rooted,
    /// Bare module specifiers, absolute and protocol-relative URLs, empty values
    External,
}

/// Classify a raw `src` value.
///
/// # Examples
/// ```ignore
/// assert_eq!(classify_src("./main.js"), SrcKind::Relative);
/// assert_eq!(classify_src("/lib.js"), SrcKind::Rooted);
/// assert_eq!(classify_src("//cdn.example.com/x.js"), SrcKind::External);
/// assert_eq!(classify_src("preact"), SrcKind::External);
/// ```
pub fn classify_src(src: &str) -> SrcKind {
    if src.starts_with("//") {
        SrcKind::External
    } else if src.starts_with('/') {
        SrcKind::Rooted
    } else if src.starts_with('.') {
        SrcKind::Relative
    } else {
        SrcKind::External
    }
}

/// Split a URL into its path and the `?query#fragment` suffix.
///
/// ```ignore
/// assert_eq!(split_suffix("./a.js?v=1#x"), ("./a.js", "?v=1#x"));
/// assert_eq!(split_suffix("./a.js"), ("./a.js", ""));
/// ```
#[inline]
pub fn split_suffix(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    }
}

/// Apply a `/`-separated path to a base location.
///
/// Leading slashes are ignored: the caller picks the base that a rooted
/// path is anchored to.
pub fn resolve_segments(base: &[String], path: &str) -> Vec<String> {
    let mut out = base.to_vec();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if out.last().is_some_and(|s| s != "..") {
                    out.pop();
                } else {
                    out.push("..".to_owned());
                }
            }
            s => out.push(s.to_owned()),
        }
    }
    out
}

/// Express `to` as a URL relative to the directory `from_dir`.
///
/// The result always starts with `./` or `../`.
pub fn relative_url(from_dir: &[String], to: &[String]) -> String {
    let common = from_dir
        .iter()
        .zip(to)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;
    let rest = &to[common..];

    let mut parts: Vec<&str> = iter::repeat_n("..", ups).collect();
    if ups == 0 && rest.first().is_none_or(|s| s != "..") {
        parts.push(".");
    }
    parts.extend(rest.iter().map(String::as_str));
    parts.join("/")
}
