//! Aggregated view of a finished batch.
//!
//! Turns the per-job results into counts, the exit status the CLI reports,
//! and a serializable report for `--json`.

use super::dispatch::BuildJobResult;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub os: String,
    pub arch: String,
    pub output_path: PathBuf,
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub jobs: Vec<JobReport>,
}

impl From<&BuildJobResult> for JobReport {
    fn from(result: &BuildJobResult) -> Self {
        Self {
            os: result.dist.os.clone(),
            arch: result.dist.arch.clone(),
            output_path: result.output_path.clone(),
            success: result.is_success(),
            output: result.output.clone(),
            error: result.error.as_ref().map(ToString::to_string),
            stderr: result
                .error
                .as_ref()
                .and_then(|e| e.stderr())
                .map(str::to_string),
        }
    }
}

impl BuildSummary {
    pub fn from_results(results: &[BuildJobResult]) -> Self {
        let jobs: Vec<JobReport> = results.iter().map(JobReport::from).collect();
        let failed = jobs.iter().filter(|j| !j.success).count();
        Self {
            total: jobs.len(),
            succeeded: jobs.len() - failed,
            failed,
            jobs,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status: 1 when any build failed, unless failures are allowed.
    pub fn exit_code(&self, allow_failures: bool) -> i32 {
        if self.all_succeeded() || allow_failures { 0 } else { 1 }
    }

    pub fn headline(&self) -> String {
        if self.all_succeeded() {
            format!("{} of {} builds succeeded", self.succeeded, self.total)
        } else {
            format!("{} of {} builds failed", self.failed, self.total)
        }
    }

    pub fn failed_targets(&self) -> Vec<String> {
        self.jobs
            .iter()
            .filter(|j| !j.success)
            .map(|j| format!("{}/{}", j.os, j.arch))
            .collect()
    }
}
