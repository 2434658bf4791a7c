//! Fake `go` toolchain for integration tests.
//!
//! Writes a small shell script that answers `tool dist list -json` from a
//! canned catalog and "builds" by writing the target pair into the output
//! file. Any target whose GOOS is `plan9` fails to build.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CATALOG: &str = r#"[
    {"GOOS": "windows", "GOARCH": "x86", "CgoSupported": true, "FirstClass": true},
    {"GOOS": "darwin", "GOARCH": "arm64", "CgoSupported": true, "FirstClass": true},
    {"GOOS": "linux", "GOARCH": "x86", "CgoSupported": true, "FirstClass": true},
    {"GOOS": "linux", "GOARCH": "arm64", "CgoSupported": true, "FirstClass": true},
    {"GOOS": "bsd", "GOARCH": "arm64", "CgoSupported": true, "FirstClass": false},
    {"GOOS": "plan9", "GOARCH": "arm", "CgoSupported": false, "FirstClass": false}
]"#;

pub struct FakeGo {
    pub dir: TempDir,
    pub program: PathBuf,
    pub project: PathBuf,
}

pub struct FakeGoBuilder {
    catalog: String,
    list_exit: i32,
    list_delay_secs: u32,
    build_delay_secs: u32,
}

impl Default for FakeGoBuilder {
    fn default() -> Self {
        Self {
            catalog: CATALOG.to_string(),
            list_exit: 0,
            list_delay_secs: 0,
            build_delay_secs: 0,
        }
    }
}

impl FakeGoBuilder {
    pub fn catalog(mut self, catalog: &str) -> Self {
        self.catalog = catalog.to_string();
        self
    }

    pub fn list_exit(mut self, code: i32) -> Self {
        self.list_exit = code;
        self
    }

    /// Delay the catalog query in a forked `sleep`, the way `go` forks `dist`.
    pub fn list_delay(mut self, secs: u32) -> Self {
        self.list_delay_secs = secs;
        self
    }

    pub fn build_delay(mut self, secs: u32) -> Self {
        self.build_delay_secs = secs;
        self
    }

    pub fn create(self) -> FakeGo {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project = dir.path().join("myproject");
        fs::create_dir_all(&project).expect("Failed to create project dir");
        fs::write(project.join("main.go"), "package main\n\nfunc main() {}\n")
            .expect("Failed to write main.go");

        let catalog_path = dir.path().join("catalog.json");
        fs::write(&catalog_path, &self.catalog).expect("Failed to write catalog");

        let script = format!(
            r#"#!/bin/sh
case "$1" in
  tool)
    sleep {list_delay}
    if [ {list_exit} -ne 0 ]; then
      echo "go: cannot find GOROOT directory" >&2
      exit {list_exit}
    fi
    cat "{catalog}"
    ;;
  build)
    sleep {delay}
    case "$GOOS" in
      plan9)
        echo "cmd/go: unsupported GOOS/GOARCH pair $GOOS/$GOARCH" >&2
        exit 1
        ;;
    esac
    printf '%s/%s\n' "$GOOS" "$GOARCH" > "$3"
    echo "built $GOOS/$GOARCH"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 3
    ;;
esac
"#,
            list_exit = self.list_exit,
            list_delay = self.list_delay_secs,
            catalog = catalog_path.display(),
            delay = self.build_delay_secs,
        );

        let program = dir.path().join("go");
        fs::write(&program, script).expect("Failed to write fake go");
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake go executable");

        FakeGo {
            dir,
            program,
            project,
        }
    }
}

impl FakeGo {
    pub fn builder() -> FakeGoBuilder {
        FakeGoBuilder::default()
    }

    pub fn new() -> Self {
        Self::builder().create()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.project.join("build")
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.output_dir().join(name)
    }

    pub fn read_artifact(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.artifact(name)).ok()
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.project.join("gxb.toml"), content).expect("Failed to write gxb.toml");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
