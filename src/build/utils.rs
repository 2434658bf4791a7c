use crate::toolchain::DistInfo;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ProjectNameError {
    #[error("unable to determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("unable to resolve project path '{path}': {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project path '{0}' has no final component to name the binary after")]
    NoName(PathBuf),
}

/// Name of the project at `path`: its last path component.
///
/// `.` (or an empty path) names the current working directory. Paths that
/// end in `..` or are a bare root are resolved on disk first.
pub fn project_name(path: &Path) -> Result<String, ProjectNameError> {
    let path = if path.as_os_str().is_empty() || path == Path::new(".") {
        std::env::current_dir().map_err(ProjectNameError::CurrentDir)?
    } else {
        path.to_path_buf()
    };

    if let Some(name) = path.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }

    let canonical = path
        .canonicalize()
        .map_err(|source| ProjectNameError::Resolve {
            path: path.clone(),
            source,
        })?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(ProjectNameError::NoName(path))
}

/// `{binary}-{os}_{arch}`, with `.exe` for Windows targets.
pub fn output_filename(binary_name: &str, dist: &DistInfo) -> String {
    let name = format!("{}-{}_{}", binary_name, dist.os, dist.arch);
    if dist.is_windows() {
        format!("{name}.exe")
    } else {
        name
    }
}

pub fn output_path(output_dir: &Path, binary_name: &str, dist: &DistInfo) -> PathBuf {
    output_dir.join(output_filename(binary_name, dist))
}
