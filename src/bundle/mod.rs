//! Bundle stage: whatever produces the output directory.
//!
//! The bundler is an opaque collaborator. Its only contract is that once
//! [`Bundler::bundle`] returns, the output directory holds finished pages.
//!
//! - [`Prebuilt`] - output was produced earlier (or by another tool)
//! - [`CommandBundler`] - run a configured command such as `rollup -c`

mod exec;

use anyhow::{Result, bail};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use crate::log;
use exec::Cmd;

/// Completion signal of the bundle stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    pub out_dir: PathBuf,
}

pub trait Bundler {
    /// Produce the output directory, returning once every file is written.
    fn bundle(&self) -> Result<BundleOutput>;
}

/// Output directory that already exists on disk.
#[derive(Debug, Clone)]
pub struct Prebuilt {
    out_dir: PathBuf,
}

impl Prebuilt {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl Bundler for Prebuilt {
    fn bundle(&self) -> Result<BundleOutput> {
        if !self.out_dir.is_dir() {
            bail!(
                "output directory `{}` not found, run the bundler first",
                self.out_dir.display()
            );
        }
        Ok(BundleOutput {
            out_dir: self.out_dir.clone(),
        })
    }
}

/// Runs an external bundler command from the project root.
#[derive(Debug, Clone)]
pub struct CommandBundler {
    command: Vec<String>,
    root: PathBuf,
    out_dir: PathBuf,
    quiet: bool,
}

impl CommandBundler {
    pub fn new(command: Vec<String>, root: &Path, out_dir: &Path) -> Self {
        Self {
            command,
            root: root.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            quiet: true,
        }
    }

    /// Echo the bundler's stdout after it finishes.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Environment handed to the bundler process.
    fn vars(&self) -> FxHashMap<String, String> {
        let mut vars = FxHashMap::default();
        vars.insert(
            "PAGEDIR_OUTPUT_DIR".into(),
            self.out_dir.display().to_string(),
        );
        vars.insert("PAGEDIR_ROOT".into(), self.root.display().to_string());
        vars
    }
}

impl Bundler for CommandBundler {
    fn bundle(&self) -> Result<BundleOutput> {
        let vars = self.vars();
        let resolved = resolve_args(&self.command, &vars);
        let cmd = Cmd::from_slice(&resolved).cwd(&self.root).envs(&vars);

        log!("bundle"; "`{}` running", cmd.program_name());
        let output = cmd.run()?;

        if !self.quiet {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stdout = stdout.trim();
            if !stdout.is_empty() {
                println!("{stdout}");
            }
        }

        // The command succeeding is not enough; it has to have produced output
        Prebuilt::new(&self.out_dir).bundle()
    }
}

/// Replace `$PAGEDIR_*` occurrences in command arguments.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}
