//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::normalize::RootedAnchor;

/// Rewrites bundled HTML into a directory-per-page layout
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pagedir.toml, searched upward)
    #[arg(short = 'C', long, default_value = "pagedir.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the bundler, then normalize its output
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: NormalizeArgs,

        /// Do not run the bundle command, use the existing output
        #[arg(long)]
        skip_bundle: bool,

        /// Print the bundler's stdout
        #[arg(long)]
        show_bundler_output: bool,
    },

    /// Normalize an existing output directory
    #[command(visible_alias = "n")]
    Normalize {
        #[command(flatten)]
        args: NormalizeArgs,
    },
}

/// Shared arguments for Build and Normalize commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct NormalizeArgs {
    /// Output directory path (relative to current directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Index filename kept in place and used for relocated pages
    #[arg(short, long)]
    pub index: Option<String>,

    /// What root-absolute script sources resolve against
    #[arg(short, long, value_enum)]
    pub rooted: Option<RootedAnchor>,

    /// Leave <script> elements without src alone instead of failing
    #[arg(short = 'k', long)]
    pub keep_inline_scripts: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Arguments shared by every subcommand.
    pub const fn normalize_args(&self) -> &NormalizeArgs {
        match &self.command {
            Commands::Build { args, .. } | Commands::Normalize { args } => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["pagedir", "build", "-o", "out", "--skip-bundle"]).unwrap();
        match &cli.command {
            Commands::Build { args, skip_bundle, .. } => {
                assert!(*skip_bundle);
                assert_eq!(args.output, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("pagedir.toml"));
    }

    #[test]
    fn test_parse_normalize_options() {
        let cli = Cli::try_parse_from([
            "pagedir",
            "n",
            "--index",
            "default.html",
            "--rooted",
            "output-root",
            "-k",
        ])
        .unwrap();
        let args = cli.normalize_args();
        assert_eq!(args.index.as_deref(), Some("default.html"));
        assert_eq!(args.rooted, Some(RootedAnchor::OutputRoot));
        assert!(args.keep_inline_scripts);
    }
}
