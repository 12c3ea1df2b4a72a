//! Normalization error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a normalization pass.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A `<script>` element has no `src` to rewrite.
    #[error("`{}`:{line}: <script> element without a `src` attribute", .page.display())]
    MissingScriptSrc { page: PathBuf, line: usize },

    #[error("failed to {action} `{}`", .path.display())]
    Io {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory `{}` does not exist", .0.display())]
    OutputDirMissing(PathBuf),

    /// Several pages (or a page and an existing file) claim one target.
    #[error("relocation target `{}` is claimed by {}", .target.display(), format_sources(.sources))]
    Conflict {
        target: PathBuf,
        sources: Vec<PathBuf>,
    },
}

impl NormalizeError {
    pub(super) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            action,
            source,
        }
    }
}

fn format_sources(sources: &[PathBuf]) -> String {
    sources
        .iter()
        .map(|p| format!("`{}`", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = NormalizeError::MissingScriptSrc {
            page: PathBuf::from("dist/about.html"),
            line: 12,
        };
        let display = err.to_string();
        assert!(display.starts_with("`dist/about.html`:12:"));
        assert!(display.contains("src"));

        let err = NormalizeError::io(
            "read",
            "dist/a.html",
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to read `dist/a.html`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_conflict_display_lists_sources() {
        let err = NormalizeError::Conflict {
            target: PathBuf::from("dist/about/index.html"),
            sources: vec![PathBuf::from("dist/about.html"), PathBuf::from("dist/about/index.html")],
        };
        let display = err.to_string();
        assert!(display.contains("`dist/about.html`, `dist/about/index.html`"));
    }
}
