//! End-to-end tests for catalog queries and parallel dispatch.
//!
//! These drive the library against a fake `go` script, so they only run
//! on unix hosts.

#![cfg(unix)]

mod support;

use gxb::build::{self, BuildError, BuildSummary};
use gxb::config::BuildConfig;
use gxb::target::{TargetFilter, resolve};
use gxb::toolchain::{CancelToken, DistInfo, Toolchain, ToolchainError};
use gxb::ui::Reporter;
use std::time::{Duration, Instant};
use support::FakeGo;

fn config_for(fake: &FakeGo) -> BuildConfig {
    BuildConfig {
        project_dir: fake.project.clone(),
        output_dir: fake.output_dir(),
        binary_name: "app".to_string(),
        toolchain: Toolchain::new(&fake.program),
        ..Default::default()
    }
}

fn pairs(dists: &[DistInfo]) -> Vec<String> {
    dists.iter().map(ToString::to_string).collect()
}

#[test]
fn test_fetch_catalog_from_toolchain() {
    let fake = FakeGo::new();
    let toolchain = Toolchain::new(&fake.program);
    let catalog = toolchain
        .fetch_catalog(&CancelToken::new(), &Reporter::quiet())
        .unwrap();

    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog[0].to_string(), "windows/x86");
    assert!(!catalog[4].first_class);
}

#[test]
fn test_catalog_filtered_to_linux() {
    let fake = FakeGo::new();
    let toolchain = Toolchain::new(&fake.program);
    let catalog = toolchain
        .fetch_catalog(&CancelToken::new(), &Reporter::quiet())
        .unwrap();

    let linux = resolve(&[TargetFilter::new("linux", "")], &catalog);
    assert_eq!(pairs(&linux), vec!["linux/x86", "linux/arm64"]);
}

#[test]
fn test_list_targets_reports_unmatched_filters() {
    let fake = FakeGo::new();
    let toolchain = Toolchain::new(&fake.program);
    let filters: Vec<TargetFilter> = vec!["haiku".parse().unwrap(), "LINUX/Z80".parse().unwrap()];

    match toolchain.list_targets(&filters, &CancelToken::new(), &Reporter::quiet()) {
        Err(ToolchainError::NoMatchingTarget { targets }) => {
            assert_eq!(targets, vec!["haiku".to_string(), "LINUX/Z80".to_string()]);
        }
        other => panic!("expected NoMatchingTarget, got {other:?}"),
    }
}

#[test]
fn test_catalog_query_failure() {
    let fake = FakeGo::builder().list_exit(2).create();
    let toolchain = Toolchain::new(&fake.program);
    match toolchain.fetch_catalog(&CancelToken::new(), &Reporter::quiet()) {
        Err(ToolchainError::Exit { stderr, .. }) => assert!(stderr.contains("GOROOT")),
        other => panic!("expected Exit, got {other:?}"),
    }
}

#[test]
fn test_catalog_parse_failure_is_distinct() {
    let fake = FakeGo::builder().catalog("linux/amd64\nwindows/386\n").create();
    let toolchain = Toolchain::new(&fake.program);
    let result = toolchain.fetch_catalog(&CancelToken::new(), &Reporter::quiet());
    assert!(matches!(result, Err(ToolchainError::Parse(_))));
}

#[test]
fn test_catalog_timeout_is_bounded() {
    let fake = FakeGo::builder().list_delay(4).create();
    let toolchain = Toolchain::new(&fake.program);
    let start = Instant::now();
    let result = toolchain.fetch_catalog(
        &CancelToken::with_timeout(Duration::from_millis(200)),
        &Reporter::quiet(),
    );
    assert!(matches!(result, Err(ToolchainError::TimedOut(_))));
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());
}

#[test]
fn test_missing_toolchain_is_launch_failure() {
    let fake = FakeGo::new();
    let toolchain = Toolchain::new(fake.path().join("not-go"));
    let result = toolchain.fetch_catalog(&CancelToken::new(), &Reporter::quiet());
    assert!(matches!(result, Err(ToolchainError::Launch { .. })));
}

#[test]
fn test_build_all_partial_failure() {
    let fake = FakeGo::new();
    let config = config_for(&fake);
    let dists = vec![
        DistInfo::new("windows", "x86"),
        DistInfo::new("plan9", "arm"),
        DistInfo::new("linux", "arm64"),
        DistInfo::new("darwin", "arm64"),
    ];

    let results = build::build_all(&config, &dists, &Reporter::quiet()).unwrap();
    assert_eq!(results.len(), 4);

    let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].dist.os, "plan9");
    match &failed[0].error {
        Some(err @ BuildError::Failed { .. }) => {
            assert!(err.stderr().unwrap().contains("unsupported GOOS/GOARCH pair"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    assert_eq!(
        fake.read_artifact("app-windows_x86.exe").as_deref(),
        Some("windows/x86\n")
    );
    assert_eq!(
        fake.read_artifact("app-linux_arm64").as_deref(),
        Some("linux/arm64\n")
    );
    assert!(fake.read_artifact("app-darwin_arm64").is_some());
    assert!(fake.read_artifact("app-plan9_arm").is_none());

    let linux = results.iter().find(|r| r.dist.os == "linux").unwrap();
    assert_eq!(linux.output.trim(), "built linux/arm64");

    let summary = BuildSummary::from_results(&results);
    assert_eq!(summary.headline(), "1 of 4 builds failed");
}

#[test]
fn test_every_dist_gets_a_result_even_duplicates() {
    let fake = FakeGo::new();
    let config = config_for(&fake);
    let dists = vec![
        DistInfo::new("linux", "x86"),
        DistInfo::new("linux", "x86"),
        DistInfo::new("plan9", "arm"),
    ];

    let results = build::build_all(&config, &dists, &Reporter::quiet()).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|r| r.is_success()).count(), 2);
}

#[test]
fn test_jobs_cap_still_builds_everything() {
    let fake = FakeGo::new();
    let config = BuildConfig {
        jobs: Some(1),
        ..config_for(&fake)
    };
    let dists = vec![
        DistInfo::new("linux", "x86"),
        DistInfo::new("linux", "arm64"),
        DistInfo::new("bsd", "arm64"),
    ];

    let results = build::build_all(&config, &dists, &Reporter::quiet()).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_success()));
}

#[test]
fn test_builds_run_concurrently() {
    let fake = FakeGo::builder().build_delay(1).create();
    let config = config_for(&fake);
    let dists = vec![
        DistInfo::new("linux", "x86"),
        DistInfo::new("linux", "arm64"),
        DistInfo::new("darwin", "arm64"),
        DistInfo::new("windows", "x86"),
    ];

    let start = Instant::now();
    let results = build::build_all(&config, &dists, &Reporter::quiet()).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(results.len(), 4);
    assert!(
        elapsed < Duration::from_secs(3),
        "builds looked sequential: {elapsed:?}"
    );
}
