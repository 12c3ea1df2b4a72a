//! `[bundle]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [bundle]
//! command = ["rollup", "-c"]  # Optional; `$PAGEDIR_ROOT` and `$PAGEDIR_OUTPUT_DIR` are substituted
//! output = "dist"             # Bundler output directory (relative to project root)
//! quiet = true                # Hide the bundler's stdout
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Bundle stage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Command and arguments that produce the output directory.
    /// Without one, `pagedir build` expects the output to exist already.
    pub command: Option<Vec<String>>,

    /// Output directory the bundler writes to.
    pub output: PathBuf,

    /// Suppress bundler output (default: true).
    pub quiet: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            command: None,
            output: PathBuf::from("dist"),
            quiet: true,
        }
    }
}

impl BundleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.command
            && command.first().is_none_or(|program| program.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "[bundle] command must name a program".into(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "[bundle] output must not be empty".into(),
            ));
        }
        Ok(())
    }
}
