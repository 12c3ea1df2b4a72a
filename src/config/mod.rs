//! Configuration management for `pagedir.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [bundle] and [normalize]
//! ├── types/         # ConfigError
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # PagedirConfig (this file)
//! ```
//!
//! The config file is optional. Without one, every section uses its
//! defaults and the current directory is the project root. CLI flags
//! override file values.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BundleConfig, NormalizeConfig};
pub use types::ConfigError;

use crate::{
    cli::{Cli, Commands, NormalizeArgs},
    debug, log,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::normalize::InlineScripts;
use crate::utils::path::normalize_path;

/// Default config file name.
pub const CONFIG_FILE: &str = "pagedir.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagedir.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PagedirConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Bundle stage settings
    pub bundle: BundleConfig,

    /// Normalization settings
    pub normalize: NormalizeConfig,
}

impl PagedirConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. A missing file is only
    /// an error when `--config` was given explicitly.
    pub fn load(cli: &Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.normalize_args().verbose);
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => Self::from_path(&path)?,
            None if cli.config != Path::new(CONFIG_FILE) => {
                return Err(ConfigError::NotFound(cli.config.clone()).into());
            }
            None => Self {
                root: cwd.clone(),
                ..Self::default()
            },
        };

        if let Some(path) = &config.config_path {
            debug!("config"; "using {}", path.display());
        }

        config.normalize_paths();
        config.apply_command_options(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let path = normalize_path(path);
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.config_path = Some(path);
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring: {}", path.display(), fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    ///
    /// `--output` is relative to the current directory, unlike the file's
    /// `bundle.output` which is relative to the project root.
    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        let args: &NormalizeArgs = cli.normalize_args();

        if let Some(output) = &args.output {
            self.bundle.output = normalize_path(&cwd.join(output));
        }
        Self::update_option(&mut self.normalize.index, args.index.as_ref());
        Self::update_option(&mut self.normalize.rooted, args.rooted.as_ref());
        if args.keep_inline_scripts {
            self.normalize.inline_scripts = InlineScripts::Keep;
        }

        if let Commands::Build {
            show_bundler_output: true,
            ..
        } = cli.command
        {
            self.bundle.quiet = false;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve the output directory against the project root.
    fn normalize_paths(&mut self) {
        self.root = normalize_path(&self.root);
        self.bundle.output = normalize_path(&self.root.join(&self.bundle.output));
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bundle.validate()?;
        self.normalize.validate()
    }
}

// ============================================================================
// tests
// ============================================================================
