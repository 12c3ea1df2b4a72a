//! `<script src>` rewriting for a page that moves one directory deeper.
//!
//! Script tags are located by a byte scan of the original text and edits are
//! spliced in by range, so everything outside the rewritten attribute values
//! is preserved exactly.

use std::ops::Range;
use std::path::Path;

use crate::utils::html::{escape_attr, script_tags, unescape};
use crate::utils::path::route::{SrcKind, classify_src, relative_url, resolve_segments, split_suffix};

use super::{InlineScripts, NormalizeError, RootedAnchor};

/// Where a page lives before and after relocation, plus rewrite policy.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
    /// Directory of the original page, relative to the output root
    pub page_dir: &'a [String],
    /// Directory of the relocation target, relative to the output root
    pub target_dir: &'a [String],
    pub rooted: RootedAnchor,
    pub inline_scripts: InlineScripts,
}

/// Result of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub html: String,
    /// Number of `src` values that changed
    pub rewritten: usize,
}

/// Rewrite every relative or rooted `<script src>` in `html`.
///
/// `page` is only used for error reporting.
pub fn rewrite_scripts(
    page: &Path,
    html: &str,
    ctx: &ScriptContext<'_>,
) -> Result<Rewritten, NormalizeError> {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for tag in script_tags(html) {
        let src = match tag.src {
            Some(src) => src,
            None if ctx.inline_scripts == InlineScripts::Keep => continue,
            None => {
                return Err(NormalizeError::MissingScriptSrc {
                    page: page.to_path_buf(),
                    line: line_of(html, tag.span.start),
                });
            }
        };

        let Some(updated) = relocate_src(&unescape(&html[src.clone()]), ctx) else {
            continue;
        };
        edits.push((src, escape_attr(&updated).into_owned()));
    }

    let rewritten = edits.len();
    Ok(Rewritten {
        html: apply_edits(html, edits),
        rewritten,
    })
}

/// Compute the new value for one `src`, or `None` when it stays as is.
pub fn relocate_src(value: &str, ctx: &ScriptContext<'_>) -> Option<String> {
    let base: &[String] = match classify_src(value) {
        SrcKind::External => return None,
        SrcKind::Relative => ctx.page_dir,
        SrcKind::Rooted => match ctx.rooted {
            RootedAnchor::PageDir => ctx.page_dir,
            RootedAnchor::OutputRoot => &[],
        },
    };

    let (path, suffix) = split_suffix(value);
    let resolved = resolve_segments(base, path);
    Some(format!("{}{suffix}", relative_url(ctx.target_dir, &resolved)))
}

/// 1-based line number of byte `offset`.
fn line_of(html: &str, offset: usize) -> usize {
    html.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

fn apply_edits(html: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    if edits.is_empty() {
        return html.to_owned();
    }
    edits.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(html.len() + edits.len() * 4);
    let mut cursor = 0;
    for (span, text) in edits {
        out.push_str(&html[cursor..span.start]);
        out.push_str(&text);
        cursor = span.end;
    }
    out.push_str(&html[cursor..]);
    out
}
