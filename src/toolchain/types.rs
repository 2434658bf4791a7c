use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Duration;

/// Environment variable that overrides the `go` program used.
pub const TOOLCHAIN_ENV: &str = "GXB_GO";

/// One GOOS/GOARCH pair the toolchain can target.
///
/// Field names on the wire follow `go tool dist list -json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistInfo {
    #[serde(rename = "GOOS")]
    pub os: String,

    #[serde(rename = "GOARCH")]
    pub arch: String,

    #[serde(rename = "CgoSupported", default)]
    pub cgo_supported: bool,

    /// First-class port: fully supported and tested upstream.
    #[serde(rename = "FirstClass", default)]
    pub first_class: bool,
}

impl DistInfo {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            cgo_supported: false,
            first_class: false,
        }
    }

    /// Environment overrides selecting this pair for cross-compilation.
    pub fn env_overrides(&self) -> [(&'static str, &str); 2] {
        [("GOOS", self.os.as_str()), ("GOARCH", self.arch.as_str())]
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows" || self.os == "nt"
    }
}

impl std::fmt::Display for DistInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Handle on the `go` program used for catalog queries and builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        let program = std::env::var_os(TOOLCHAIN_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("go"));
        Self { program }
    }
}

impl Toolchain {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `go tool dist list -json`
    pub fn dist_list_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["tool", "dist", "list", "-json"]);
        cmd
    }

    /// `go build -o <output> <project>`, run from inside the project.
    pub fn build_command(&self, output: &Path, project_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("build").arg("-o").arg(output).arg(project_dir);
        cmd.current_dir(project_dir);
        cmd
    }
}

/// Error type for catalog queries
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output of '{program}': {source}")]
    Read {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program} tool dist list' exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to parse target catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("target catalog query was cancelled")]
    Cancelled,

    #[error("target catalog query timed out after {0:?}")]
    TimedOut(Duration),

    #[error("no supported target matched: {}", .targets.join(", "))]
    NoMatchingTarget { targets: Vec<String> },
}
