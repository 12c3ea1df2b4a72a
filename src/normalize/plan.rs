//! Relocation planning: everything that can fail before the tree is touched.

use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::path::path_segments;

use super::rewrite::{ScriptContext, rewrite_scripts};
use super::scan::Page;
use super::{NormalizeError, NormalizeOptions};

/// A page that is ready to be written to its new location.
#[derive(Debug, Clone)]
pub struct Relocation {
    pub source: PathBuf,
    pub target: PathBuf,
    pub html: String,
    /// Number of script references that were rewritten
    pub rewritten: usize,
}

/// Read one page and rewrite its scripts for the target location.
pub fn plan_page(
    page: &Page,
    out_dir: &Path,
    options: &NormalizeOptions,
) -> Result<Relocation, NormalizeError> {
    let rel_target = page.rel_target(&options.index);
    let page_dir = page.rel.parent().map(path_segments).unwrap_or_default();
    let target_dir = rel_target.parent().map(path_segments).unwrap_or_default();

    let content = fs::read_to_string(&page.source)
        .map_err(|err| NormalizeError::io("read", &page.source, err))?;

    let ctx = ScriptContext {
        page_dir: &page_dir,
        target_dir: &target_dir,
        rooted: options.rooted,
        inline_scripts: options.inline_scripts,
    };
    let rewritten = rewrite_scripts(&page.source, &content, &ctx)?;

    Ok(Relocation {
        source: page.source.clone(),
        target: page.target(out_dir, &options.index),
        html: rewritten.html,
        rewritten: rewritten.rewritten,
    })
}

/// Reject plans where two pages share a target or a target already exists.
pub fn check_conflicts(plans: &[Relocation]) -> Result<(), NormalizeError> {
    let mut claims: FxHashMap<&Path, Vec<PathBuf>> = FxHashMap::default();
    for plan in plans {
        claims
            .entry(plan.target.as_path())
            .or_default()
            .push(plan.source.clone());
    }

    let mut conflicts: Vec<_> = claims
        .into_iter()
        .filter_map(|(target, mut sources)| {
            if target.exists() {
                sources.push(target.to_path_buf());
            }
            (sources.len() > 1).then(|| (target.to_path_buf(), sources))
        })
        .collect();

    // Report the same conflict on every run
    conflicts.sort();
    match conflicts.into_iter().next() {
        Some((target, mut sources)) => {
            sources.sort();
            Err(NormalizeError::Conflict { target, sources })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn relocation(source: &Path, target: &Path) -> Relocation {
        Relocation {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            html: String::new(),
            rewritten: 0,
        }
    }

    #[test]
    fn test_plan_page() {
        let dir = TempDir::new().unwrap();
        let out = dir.path();
        fs::create_dir_all(out.join("pages")).unwrap();
        fs::write(
            out.join("pages/about.html"),
            r#"<script src="./main.js"></script>"#,
        )
        .unwrap();

        let page = Page {
            source: out.join("pages/about.html"),
            rel: PathBuf::from("pages/about.html"),
        };
        let plan = plan_page(&page, out, &NormalizeOptions::default()).unwrap();
        assert_eq!(plan.target, out.join("pages/about/index.html"));
        assert_eq!(plan.html, r#"<script src="../main.js"></script>"#);
        assert_eq!(plan.rewritten, 1);
    }

    #[test]
    fn test_plan_page_missing_file() {
        let dir = TempDir::new().unwrap();
        let page = Page {
            source: dir.path().join("gone.html"),
            rel: PathBuf::from("gone.html"),
        };
        let err = plan_page(&page, dir.path(), &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::Io { action: "read", .. }));
    }

    #[test]
    fn test_conflict_between_plans() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a/index.html");
        let plans = [
            relocation(&dir.path().join("b.html"), &target),
            relocation(&dir.path().join("a.html"), &target),
        ];
        match check_conflicts(&plans).unwrap_err() {
            NormalizeError::Conflict { target: t, sources } => {
                assert_eq!(t, target);
                assert_eq!(sources, [dir.path().join("a.html"), dir.path().join("b.html")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_conflict_with_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/index.html"), "").unwrap();

        let plans = [relocation(
            &dir.path().join("a.html"),
            &dir.path().join("a/index.html"),
        )];
        assert!(matches!(
            check_conflicts(&plans),
            Err(NormalizeError::Conflict { .. })
        ));
    }

    #[test]
    fn test_no_conflicts() {
        let dir = TempDir::new().unwrap();
        let plans = [
            relocation(&dir.path().join("a.html"), &dir.path().join("a/index.html")),
            relocation(&dir.path().join("b.html"), &dir.path().join("b/index.html")),
        ];
        assert!(check_conflicts(&plans).is_ok());
    }
}
