//! Toolchain inspection
//!
//! Asks the `go` toolchain which GOOS/GOARCH pairs it supports. The query
//! only fetches and parses; narrowing the catalog down is left to
//! [`crate::target::resolve`], so one catalog can be filtered many ways
//! without re-running the toolchain.

pub mod process;
pub mod types;

pub use process::{CancelToken, run_cancellable};
pub use types::{DistInfo, TOOLCHAIN_ENV, Toolchain, ToolchainError};

use crate::target::{self, TargetFilter};
use crate::ui::Reporter;

/// Parse the JSON array printed by `go tool dist list -json`.
pub fn parse_catalog(raw: &[u8]) -> Result<Vec<DistInfo>, ToolchainError> {
    Ok(serde_json::from_slice(raw)?)
}

impl Toolchain {
    /// Query the full target catalog.
    pub fn fetch_catalog(
        &self,
        cancel: &CancelToken,
        reporter: &Reporter,
    ) -> Result<Vec<DistInfo>, ToolchainError> {
        reporter.verbose(format!(
            "querying targets: {} tool dist list -json",
            self.program().display()
        ));

        let output = run_cancellable(&mut self.dist_list_command(), cancel)?;
        if !output.status.success() {
            return Err(ToolchainError::Exit {
                program: self.program().display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let catalog = parse_catalog(&output.stdout)?;
        reporter.verbose(format!("toolchain supports {} targets", catalog.len()));
        Ok(catalog)
    }

    /// Query the catalog and narrow it to `filters`.
    ///
    /// Fails with [`ToolchainError::NoMatchingTarget`] when filters were
    /// given but nothing matched them.
    pub fn list_targets(
        &self,
        filters: &[TargetFilter],
        cancel: &CancelToken,
        reporter: &Reporter,
    ) -> Result<Vec<DistInfo>, ToolchainError> {
        let catalog = self.fetch_catalog(cancel, reporter)?;
        select_targets(filters, &catalog)
    }
}

/// [`target::resolve`] with the empty-result check applied.
pub fn select_targets(
    filters: &[TargetFilter],
    catalog: &[DistInfo],
) -> Result<Vec<DistInfo>, ToolchainError> {
    let selected = target::resolve(filters, catalog);
    if selected.is_empty() && !filters.is_empty() {
        return Err(ToolchainError::NoMatchingTarget {
            targets: filters.iter().map(|f| f.raw().to_string()).collect(),
        });
    }
    Ok(selected)
}
