//! Page discovery (reads the tree, never modifies it).

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use super::NormalizeError;

/// An HTML file inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Absolute (or cwd-relative) path on disk
    pub source: PathBuf,
    /// Path relative to the output directory
    pub rel: PathBuf,
}

impl Page {
    /// Where this page lands after relocation: `<dir>/<stem>/<index>`.
    pub fn target(&self, out_dir: &Path, index: &str) -> PathBuf {
        out_dir.join(self.rel_target(index))
    }

    /// `target` relative to the output directory.
    pub fn rel_target(&self, index: &str) -> PathBuf {
        let stem = self.rel.file_stem().unwrap_or_default();
        let dir = self.rel.parent().unwrap_or(Path::new(""));
        dir.join(stem).join(index)
    }

    /// Whether the file name is exactly the index filename.
    pub fn is_index(&self, index: &str) -> bool {
        self.rel.file_name().is_some_and(|name| name == index)
    }
}

/// Pages split by whether they move.
#[derive(Debug, Default)]
pub struct Discovered {
    /// Already named `index`, left in place
    pub index: Vec<Page>,
    /// Everything else
    pub relocate: Vec<Page>,
}

/// Collect every `*.html` file below `out_dir`, sorted by path.
///
/// Hidden entries are skipped, matching what a default `**/*.html` glob sees.
pub fn discover_pages(out_dir: &Path) -> Result<Vec<Page>, NormalizeError> {
    if !out_dir.is_dir() {
        return Err(NormalizeError::OutputDirMissing(out_dir.to_path_buf()));
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(out_dir).sort(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().map_or_else(|| out_dir.to_path_buf(), Path::to_path_buf);
            NormalizeError::io("walk", path, err.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let source = entry.path();
        if source.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let rel = source
            .strip_prefix(out_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source.clone());
        pages.push(Page { source, rel });
    }

    Ok(pages)
}

/// Partition pages into index pages and pages to relocate.
pub fn partition(pages: Vec<Page>, index: &str) -> Discovered {
    let (index_pages, relocate): (Vec<_>, Vec<_>) = pages.into_iter().partition(|p| p.is_index(index));
    Discovered {
        index: index_pages,
        relocate,
    }
}
