use criterion::{Criterion, criterion_group, criterion_main};
use gxb::build::output_filename;
use gxb::target::{TargetFilter, parse_all, resolve};
use gxb::toolchain::{DistInfo, parse_catalog};
use std::hint::black_box;

const OSES: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "illumos", "ios", "js", "linux",
    "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows",
];
const ARCHES: &[&str] = &["386", "amd64", "arm", "arm64", "loong64", "ppc64le", "riscv64", "s390x"];

fn mock_catalog_json() -> String {
    let entries: Vec<String> = OSES
        .iter()
        .flat_map(|os| {
            ARCHES.iter().map(move |arch| {
                format!(
                    r#"{{"GOOS":"{os}","GOARCH":"{arch}","CgoSupported":true,"FirstClass":false}}"#
                )
            })
        })
        .collect();
    format!("[{}]", entries.join(","))
}

fn bench_parse_catalog(c: &mut Criterion) {
    let raw = mock_catalog_json();
    c.bench_function("parse_dist_list_json", |b| {
        b.iter(|| parse_catalog(black_box(raw.as_bytes())).unwrap())
    });
}

fn bench_parse_filters(c: &mut Criterion) {
    let raw = ["linux", "Windows/AMD64", "darwin/arm64", "a/b/c", "FreeBSD"];
    c.bench_function("parse_target_filters", |b| {
        b.iter(|| parse_all(black_box(&raw)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = parse_catalog(mock_catalog_json().as_bytes()).unwrap();
    let filters = vec![
        TargetFilter::new("linux", ""),
        TargetFilter::new("windows", "amd64"),
        TargetFilter::new("darwin", ""),
    ];
    c.bench_function("resolve_targets", |b| {
        b.iter(|| resolve(black_box(&filters), black_box(&catalog)))
    });
}

fn bench_output_filename(c: &mut Criterion) {
    let dist = DistInfo::new("windows", "arm64");
    c.bench_function("output_filename", |b| {
        b.iter(|| output_filename(black_box("myproject"), black_box(&dist)))
    });
}

criterion_group!(
    benches,
    bench_parse_catalog,
    bench_parse_filters,
    bench_resolve,
    bench_output_filename
);
criterion_main!(benches);
