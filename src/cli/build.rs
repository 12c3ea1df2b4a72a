//! Build orchestration.
//!
//! Pipeline phases:
//! - **Bundle** - run the configured bundler, or accept existing output
//! - **Normalize** - relocate pages into `<name>/index.html`
//!
//! The normalize phase receives its output directory from the bundle
//! phase's completion signal, never from shared state.

use anyhow::{Context, Result};
use std::path::Path;

use crate::{
    bundle::{BundleOutput, Bundler, CommandBundler, Prebuilt},
    config::PagedirConfig,
    debug, log,
    normalize::{NormalizeReport, normalize},
    utils::plural_count,
};

/// Run both phases.
pub fn build(config: &PagedirConfig, skip_bundle: bool) -> Result<NormalizeReport> {
    let BundleOutput { out_dir } = bundler_for(config, skip_bundle).bundle()?;
    normalize_output(&out_dir, config)
}

/// Pick the bundle implementation for this run.
fn bundler_for(config: &PagedirConfig, skip_bundle: bool) -> Box<dyn Bundler> {
    match &config.bundle.command {
        Some(command) if !skip_bundle => Box::new(
            CommandBundler::new(command.clone(), config.get_root(), &config.bundle.output)
                .quiet(config.bundle.quiet),
        ),
        _ => Box::new(Prebuilt::new(&config.bundle.output)),
    }
}

/// Normalize phase only, with a summary line.
pub fn normalize_output(out_dir: &Path, config: &PagedirConfig) -> Result<NormalizeReport> {
    let report = normalize(out_dir, &config.normalize.options())
        .with_context(|| format!("failed to normalize `{}`", out_dir.display()))?;

    for page in &report.relocated {
        debug!(
            "normalize";
            "{} -> {} ({})",
            page.from.display(),
            page.to.display(),
            plural_count(page.rewritten, "script")
        );
    }

    log!(
        "normalize";
        "relocated {}, rewrote {}, kept {}",
        plural_count(report.relocated.len(), "page"),
        plural_count(report.scripts_rewritten(), "script"),
        plural_count(report.kept, "index page")
    );

    Ok(report)
}
