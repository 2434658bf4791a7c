use crate::build::{ProjectNameError, project_name};
use crate::target::{self, ParseTargetError, TargetFilter};
use crate::toolchain::Toolchain;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional per-project settings file.
pub const CONFIG_FILE: &str = "gxb.toml";

/// Parameters for one invocation, shared read-only by every build job.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub project_dir: PathBuf,
    pub output_dir: PathBuf,
    pub binary_name: String,
    pub targets: Vec<TargetFilter>,
    /// Upper bound on concurrent builds. `None` runs every job at once.
    pub jobs: Option<usize>,
    pub first_class_only: bool,
    pub toolchain: Toolchain,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("./"),
            output_dir: PathBuf::from("./build"),
            binary_name: "build".to_string(),
            targets: Vec::new(),
            jobs: None,
            first_class_only: false,
            toolchain: Toolchain::default(),
        }
    }
}

/// Contents of `gxb.toml`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub build: FileBuildSection,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileBuildSection {
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub targets: Vec<String>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub first_class: bool,
    pub go: Option<PathBuf>,
}

/// Values given on the command line. Anything set here wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub targets: Vec<String>,
    pub jobs: Option<usize>,
    pub first_class: bool,
    pub go: Option<PathBuf>,
}

/// Load `gxb.toml` from `project_dir`. A missing file yields the defaults.
pub fn load_file_config(project_dir: &Path) -> Result<FileConfig> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse {} - check for syntax errors or unknown keys",
            path.display()
        )
    })
}

/// The project directory an invocation works on. Empty or `.` means the
/// current directory; the result is always absolute.
pub fn resolve_project_dir(project: Option<&Path>) -> Result<PathBuf, ProjectNameError> {
    let dir = match project {
        Some(p) if !p.as_os_str().is_empty() && p != Path::new(".") => p.to_path_buf(),
        _ => std::env::current_dir().map_err(ProjectNameError::CurrentDir)?,
    };
    std::path::absolute(&dir).map_err(ProjectNameError::CurrentDir)
}

impl BuildConfig {
    /// Layer defaults, `file` and `overrides` into one config.
    ///
    /// Target strings that fail to parse are returned alongside the config
    /// so the caller can warn about them; they never abort the run.
    pub fn from_layers(
        project_dir: PathBuf,
        file: &FileConfig,
        overrides: &Overrides,
    ) -> Result<(Self, Vec<ParseTargetError>), ProjectNameError> {
        let section = &file.build;

        let binary_name = match overrides.name.as_ref().or(section.name.as_ref()) {
            Some(name) => name.clone(),
            None => project_name(&project_dir)?,
        };

        let output_dir = match (&overrides.output, &section.output) {
            (Some(out), _) => std::path::absolute(out).map_err(ProjectNameError::CurrentDir)?,
            (None, Some(out)) => project_dir.join(out),
            (None, None) => project_dir.join("build"),
        };

        let raw_targets = if overrides.targets.is_empty() {
            &section.targets
        } else {
            &overrides.targets
        };
        let (targets, rejected) = target::parse_all(raw_targets);

        let toolchain = match overrides.go.as_ref().or(section.go.as_ref()) {
            Some(program) => Toolchain::new(program),
            None => Toolchain::default(),
        };

        let config = Self {
            project_dir,
            output_dir,
            binary_name,
            targets,
            jobs: overrides.jobs.or(section.jobs).filter(|&n| n > 0),
            first_class_only: overrides.first_class || section.first_class,
            toolchain,
        };
        Ok((config, rejected))
    }
}
