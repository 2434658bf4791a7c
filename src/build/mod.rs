//! Parallel build dispatch
//!
//! Turns resolved distributions into `go build` jobs, runs them all at once
//! and collects one result per job.

mod dispatch;
mod feedback;
mod summary;
mod utils;

pub use dispatch::{BuildError, BuildJob, BuildJobResult, build_all, plan};
pub use feedback::FeedbackAnalyzer;
pub use summary::{BuildSummary, JobReport};
pub use utils::{ProjectNameError, output_filename, output_path, project_name};
