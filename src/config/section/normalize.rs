//! `[normalize]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [normalize]
//! index = "index.html"        # Pages with this name stay put; moved pages get it
//! rooted = "page-dir"         # `/lib.js` anchor: page-dir | output-root
//! inline_scripts = "reject"   # <script> without src: reject | keep
//! ```

use serde::Deserialize;

use crate::config::ConfigError;
use crate::normalize::{DEFAULT_INDEX, InlineScripts, NormalizeOptions, RootedAnchor};

/// Output normalization settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Index filename, used both to detect and to generate index pages.
    pub index: String,

    /// What root-absolute script sources are resolved against.
    pub rooted: RootedAnchor,

    /// Policy for `<script>` elements without `src`.
    pub inline_scripts: InlineScripts,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_owned(),
            rooted: RootedAnchor::default(),
            inline_scripts: InlineScripts::default(),
        }
    }
}

impl NormalizeConfig {
    /// `index` must be a bare file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let index = self.index.as_str();
        if index.is_empty() || index == "." || index == ".." || index.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "[normalize] index must be a plain file name, got `{index}`"
            )));
        }
        Ok(())
    }

    pub fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            index: self.index.clone(),
            rooted: self.rooted,
            inline_scripts: self.inline_scripts,
        }
    }
}
