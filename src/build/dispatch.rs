use super::feedback::FeedbackAnalyzer;
use super::utils::output_path;
use crate::config::BuildConfig;
use crate::toolchain::DistInfo;
use crate::ui::Reporter;
use anyhow::{Context, Result};
use colored::*;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

/// Why a single target failed to build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("go build exited with {status}")]
    Failed { status: ExitStatus, stderr: String },
}

impl BuildError {
    /// Compiler diagnostics, if the build got far enough to produce any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            BuildError::Failed { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// One `go build` invocation for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub dist: DistInfo,
    pub output_path: PathBuf,
}

/// Outcome of one job. `error` is `None` on success.
#[derive(Debug)]
pub struct BuildJobResult {
    pub dist: DistInfo,
    pub output_path: PathBuf,
    /// Captured stdout of the build.
    pub output: String,
    pub error: Option<BuildError>,
}

impl BuildJobResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl BuildJob {
    pub fn new(config: &BuildConfig, dist: &DistInfo) -> Self {
        Self {
            dist: dist.clone(),
            output_path: output_path(&config.output_dir, &config.binary_name, dist),
        }
    }

    /// The build command: inherited environment plus GOOS/GOARCH.
    pub fn command(&self, config: &BuildConfig) -> Command {
        let mut cmd = config
            .toolchain
            .build_command(&self.output_path, &config.project_dir);
        cmd.envs(self.dist.env_overrides());
        cmd
    }

    /// Shell-like rendering of the command, for `--dry-run` and verbose logs.
    pub fn describe(&self, config: &BuildConfig) -> String {
        let [(os_key, os), (arch_key, arch)] = self.dist.env_overrides();
        format!(
            "{os_key}={os} {arch_key}={arch} {} build -o {} {}",
            config.toolchain.program().display(),
            self.output_path.display(),
            config.project_dir.display()
        )
    }

    pub fn run(&self, config: &BuildConfig) -> BuildJobResult {
        let result = self
            .command(config)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BuildError::Launch {
                program: config.toolchain.program().display().to_string(),
                source,
            });

        let (output, error) = match result {
            Ok(out) => {
                let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
                let error = (!out.status.success()).then(|| BuildError::Failed {
                    status: out.status,
                    stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
                });
                (stdout, error)
            }
            Err(e) => (String::new(), Some(e)),
        };

        BuildJobResult {
            dist: self.dist.clone(),
            output_path: self.output_path.clone(),
            output,
            error,
        }
    }
}

/// One job per distribution, in the same order.
pub fn plan(config: &BuildConfig, dists: &[DistInfo]) -> Vec<BuildJob> {
    dists.iter().map(|dist| BuildJob::new(config, dist)).collect()
}

/// Build every distribution concurrently and wait for all of them.
///
/// Each job gets its own worker unless `config.jobs` caps the pool. A failed
/// job is recorded in its result and never stops its siblings, so the
/// returned vector always has one entry per input distribution.
pub fn build_all(
    config: &BuildConfig,
    dists: &[DistInfo],
    reporter: &Reporter,
) -> Result<Vec<BuildJobResult>> {
    let jobs = plan(config, dists);
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let start_time = Instant::now();

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let workers = config.jobs.unwrap_or(jobs.len()).clamp(1, jobs.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("gxb-build-{i}"))
        .build()
        .context("Failed to start build workers")?;

    reporter.verbose(format!(
        "dispatching {} builds on {} workers into {}",
        jobs.len(),
        workers,
        config.output_dir.display()
    ));

    let pb = reporter.progress(jobs.len() as u64);
    pb.set_message("Building...");

    let results: Vec<BuildJobResult> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                if reporter.is_verbose() {
                    let line = format!("   {} {}", "verbose:".dimmed(), job.describe(config));
                    emit(&pb, line);
                }
                let result = job.run(config);
                report_job(&pb, reporter, &result);
                pb.inc(1);
                result
            })
            .collect()
    });

    pb.finish_and_clear();
    reporter.verbose(format!("builds finished in {:.2?}", start_time.elapsed()));

    Ok(results)
}

// Per-job lines go through the bar so they don't tear it.
fn emit(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        eprintln!("{line}");
    } else {
        pb.println(line);
    }
}

fn report_job(pb: &ProgressBar, reporter: &Reporter, result: &BuildJobResult) {
    match &result.error {
        None => {
            if reporter.is_verbose() {
                emit(
                    pb,
                    format!(
                        "{} {} -> {}",
                        "✓".green(),
                        result.dist,
                        result.output_path.display()
                    ),
                );
                if !result.output.trim().is_empty() {
                    emit(pb, result.output.trim_end().to_string());
                }
            }
        }
        Some(err) => {
            emit(pb, format!("{} {}: {}", "x".red(), result.dist, err));
            if let Some(stderr) = err.stderr() {
                emit(pb, stderr.to_string());
                if let Some(hint) = FeedbackAnalyzer::analyze(stderr) {
                    emit(pb, format!("{} {}", "hint:".cyan(), hint));
                }
            }
        }
    }
}
