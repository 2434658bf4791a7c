//! CLI Command handlers
//!
//! The pieces `main.rs` drives: each handler turns parsed arguments into a
//! [`BuildConfig`](crate::config::BuildConfig), runs the library and prints
//! the outcome.

pub mod build;
pub mod list;

use crate::config::{self, BuildConfig, Overrides};
use crate::toolchain::{CancelToken, DistInfo, ToolchainError};
use crate::ui::Reporter;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Default deadline for the catalog query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolve the project, load `gxb.toml` and layer `overrides` on top.
/// Unparseable targets are warned about and dropped.
pub fn prepare_config(
    project: Option<&Path>,
    overrides: &Overrides,
    reporter: &Reporter,
) -> Result<BuildConfig> {
    let project_dir = config::resolve_project_dir(project).context("project dir")?;
    reporter.verbose(format!("project dir: {}", project_dir.display()));

    let file = config::load_file_config(&project_dir)?;
    let (config, rejected) =
        BuildConfig::from_layers(project_dir, &file, overrides).context("project name")?;

    for err in &rejected {
        reporter.warn(format!("{err}, ignoring it"));
    }

    reporter.verbose(format!("project name: {}", config.binary_name));
    reporter.verbose(format!("output directory: {}", config.output_dir.display()));
    Ok(config)
}

/// Fetch the catalog and narrow it to the configured targets.
pub fn resolve_dists(
    config: &BuildConfig,
    timeout: Duration,
    reporter: &Reporter,
) -> Result<Vec<DistInfo>> {
    let cancel = CancelToken::with_timeout(timeout);
    let mut dists = match config.toolchain.list_targets(&config.targets, &cancel, reporter) {
        Ok(dists) => dists,
        Err(err @ ToolchainError::NoMatchingTarget { .. }) => {
            return Err(anyhow::Error::new(err).context("unsupported targets"));
        }
        Err(err) => return Err(anyhow::Error::new(err).context("build options")),
    };

    if config.first_class_only {
        dists.retain(|d| d.first_class);
    }

    if dists.is_empty() {
        anyhow::bail!("no targets left to build");
    }
    Ok(dists)
}
