//! Output normalization: `page.html` → `page/index.html`.
//!
//! Runs once the bundler has finished writing its output directory.
//!
//! ```text
//! dist/                              dist/
//! ├── main.js                        ├── main.js
//! └── pages/                         └── pages/
//!     ├── index.html       ──>           ├── index.html        (untouched)
//!     ├── about.html                     ├── about/index.html  (./main.js -> ../main.js)
//!     └── blog/post.html                 └── blog/post/index.html
//! ```
//!
//! # Phases
//!
//! - **Discover** - walk the output directory for `*.html`, split off index pages
//! - **Plan** - read, parse and rewrite every page in parallel, nothing written
//! - **Check** - reject relocations that collide
//! - **Commit** - write targets and remove sources in parallel
//!
//! Both parallel phases stop at the first error. A malformed page or a
//! conflict therefore leaves the tree untouched, while a filesystem error
//! during commit leaves already committed pages in their new place.

mod commit;
mod error;
mod plan;
mod rewrite;
mod scan;

pub use error::NormalizeError;

use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::debug;

/// Default name for generated index pages.
pub const DEFAULT_INDEX: &str = "index.html";

/// What a root-absolute `src` (`/lib.js`) is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RootedAnchor {
    /// The page's own directory
    #[default]
    PageDir,
    /// The output directory root
    OutputRoot,
}

/// How `<script>` elements without `src` are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InlineScripts {
    /// Fail the pass
    #[default]
    Reject,
    /// Leave the element alone
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Marks pages that stay in place and names the generated ones
    pub index: String,
    pub rooted: RootedAnchor,
    pub inline_scripts: InlineScripts,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_owned(),
            rooted: RootedAnchor::default(),
            inline_scripts: InlineScripts::default(),
        }
    }
}

/// A relocation that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocated {
    pub from: PathBuf,
    pub to: PathBuf,
    pub rewritten: usize,
}

/// Outcome of a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Pages moved, sorted by original path
    pub relocated: Vec<Relocated>,
    /// Index pages left where they were
    pub kept: usize,
}

impl NormalizeReport {
    /// Total number of script references rewritten.
    pub fn scripts_rewritten(&self) -> usize {
        self.relocated.iter().map(|r| r.rewritten).sum()
    }
}

/// Normalize `out_dir` into a directory-per-page layout.
pub fn normalize(
    out_dir: &Path,
    options: &NormalizeOptions,
) -> Result<NormalizeReport, NormalizeError> {
    let pages = scan::discover_pages(out_dir)?;
    let found = scan::partition(pages, &options.index);
    debug!(
        "normalize";
        "{} to relocate, {} index page(s) kept",
        found.relocate.len(),
        found.index.len()
    );

    let plans = found
        .relocate
        .par_iter()
        .map(|page| plan::plan_page(page, out_dir, options))
        .collect::<Result<Vec<_>, _>>()?;

    plan::check_conflicts(&plans)?;

    plans.par_iter().try_for_each(commit::commit)?;

    let relocated = plans
        .into_iter()
        .map(|plan| Relocated {
            from: plan.source,
            to: plan.target,
            rewritten: plan.rewritten,
        })
        .collect();

    Ok(NormalizeReport {
        relocated,
        kept: found.index.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    fn run(root: &Path) -> Result<NormalizeReport, NormalizeError> {
        normalize(root, &NormalizeOptions::default())
    }

    #[test]
    fn test_relative_script_page() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "pages/about.html", r#"<script src="./main.js"></script>"#);

        let report = run(root).unwrap();

        assert!(!root.join("pages/about.html").exists());
        assert_eq!(
            read(root, "pages/about/index.html"),
            r#"<script src="../main.js"></script>"#
        );
        assert_eq!(report.relocated.len(), 1);
        assert_eq!(report.scripts_rewritten(), 1);
    }

    #[test]
    fn test_rooted_script_nested_page() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "pages/blog/post.html", r#"<script src="/shared/lib.js"></script>"#);

        run(root).unwrap();

        assert_eq!(
            read(root, "pages/blog/post/index.html"),
            r#"<script src="../shared/lib.js"></script>"#
        );
    }

    #[test]
    fn test_rooted_script_output_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "pages/blog/post.html", r#"<script src="/shared/lib.js"></script>"#);

        let options = NormalizeOptions {
            rooted: RootedAnchor::OutputRoot,
            ..NormalizeOptions::default()
        };
        normalize(root, &options).unwrap();

        assert_eq!(
            read(root, "pages/blog/post/index.html"),
            r#"<script src="../../../shared/lib.js"></script>"#
        );
    }

    #[test]
    fn test_index_page_untouched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let html = r#"<script src="./main.js"></script>"#;
        write(root, "pages/index.html", html);

        let report = run(root).unwrap();

        assert_eq!(read(root, "pages/index.html"), html);
        assert!(!root.join("pages/index").exists());
        assert!(report.relocated.is_empty());
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn test_bare_specifier_untouched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let html = concat!(
            r#"<script src="my-module"></script>"#,
            r#"<script src="https://esm.sh/preact"></script>"#,
            r#"<script src="//cdn.example.com/x.js"></script>"#,
        );
        write(root, "app.html", html);

        let report = run(root).unwrap();

        assert_eq!(read(root, "app/index.html"), html);
        assert_eq!(report.scripts_rewritten(), 0);
    }

    #[test]
    fn test_unquoted_and_uppercase_sources_follow_the_page() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "docs/guide.html",
            "<SCRIPT SRC=./guide.js></SCRIPT><script>if (a<b) document.write('<script>')</script>",
        );

        let options = NormalizeOptions {
            inline_scripts: InlineScripts::Keep,
            ..NormalizeOptions::default()
        };
        let report = normalize(root, &options).unwrap();

        assert_eq!(
            read(root, "docs/guide/index.html"),
            "<SCRIPT SRC=../guide.js></SCRIPT><script>if (a<b) document.write('<script>')</script>"
        );
        assert_eq!(report.scripts_rewritten(), 1);
    }

    #[test]
    fn test_missing_src_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "good.html", r#"<script src="./a.js"></script>"#);
        write(root, "bad.html", "<script>alert(1)</script>");

        let err = run(root).unwrap_err();

        assert!(matches!(err, NormalizeError::MissingScriptSrc { .. }));
        assert!(root.join("bad.html").exists());
        assert!(!root.join("bad/index.html").exists());
        assert!(root.join("good.html").exists());
        assert!(!root.join("good/index.html").exists());
    }

    #[test]
    fn test_inline_scripts_kept_when_allowed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "a.html", "<script>alert(1)</script>");

        let options = NormalizeOptions {
            inline_scripts: InlineScripts::Keep,
            ..NormalizeOptions::default()
        };
        normalize(root, &options).unwrap();

        assert_eq!(read(root, "a/index.html"), "<script>alert(1)</script>");
    }

    #[test]
    fn test_second_run_is_noop() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "index.html", r#"<script src="./main.js"></script>"#);
        write(root, "about.html", r#"<script src="./main.js"></script>"#);
        write(root, "docs/guide.html", r#"<script src="../main.js"></script>"#);

        let first = run(root).unwrap();
        assert_eq!(first.relocated.len(), 2);
        let snapshot = (
            read(root, "about/index.html"),
            read(root, "docs/guide/index.html"),
        );
        assert_eq!(snapshot.1, r#"<script src="../../main.js"></script>"#);

        let second = run(root).unwrap();
        assert!(second.relocated.is_empty());
        assert_eq!(second.kept, 3);
        assert_eq!(
            snapshot,
            (read(root, "about/index.html"), read(root, "docs/guide/index.html"))
        );
    }

    #[test]
    fn test_custom_index_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "home.htm.html", "");
        write(root, "about.html", "");
        write(root, "default.html", "");

        let options = NormalizeOptions {
            index: "default.html".into(),
            ..NormalizeOptions::default()
        };
        let report = normalize(root, &options).unwrap();

        assert_eq!(report.kept, 1);
        assert!(root.join("default.html").exists());
        assert!(root.join("about/default.html").exists());
        assert!(root.join("home.htm/default.html").exists());
    }

    #[test]
    fn test_conflict_leaves_tree_untouched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "about.html", "page");
        write(root, "about/index.html", "existing");

        let err = run(root).unwrap_err();

        assert!(matches!(err, NormalizeError::Conflict { .. }));
        assert_eq!(read(root, "about.html"), "page");
        assert_eq!(read(root, "about/index.html"), "existing");
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let err = run(&dir.path().join("dist")).unwrap_err();
        assert!(matches!(err, NormalizeError::OutputDirMissing(_)));
    }

    #[test]
    fn test_report_sorted_by_source() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for name in ["c.html", "a.html", "b.html"] {
            write(root, name, "");
        }

        let report = run(root).unwrap();
        let names: Vec<_> = report
            .relocated
            .iter()
            .map(|r| r.from.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.html", "b.html", "c.html"]);
    }
}
