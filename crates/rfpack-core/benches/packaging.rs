//! Benchmarks for deployment packaging.
//!
//! Measures the full run over a project-shaped tree and the cost of the
//! exclusion check on its own.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use rfpack_core::NoopObserver;
use rfpack_core::PackageConfig;
use rfpack_core::create_deployment_archive;
use rfpack_core::should_exclude;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

/// Creates a tree with `file_count` 1 KB source files plus a large
/// `node_modules` directory that should be pruned.
fn create_project(temp: &TempDir, file_count: usize) {
    let root = temp.path();
    let content = "x".repeat(1024);

    fs::create_dir_all(root.join("src")).unwrap();
    for i in 0..file_count {
        fs::write(root.join(format!("src/module_{i:05}.ts")), &content).unwrap();
    }

    for pkg in 0..50 {
        let dir = root.join(format!("node_modules/pkg_{pkg}/lib"));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..20 {
            fs::write(dir.join(format!("file_{i}.js")), &content).unwrap();
        }
    }
}

fn bench_create_archive(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_deployment_archive");

    for file_count in [10, 100, 1000] {
        let temp = TempDir::new().unwrap();
        create_project(&temp, file_count);
        let config = PackageConfig::default().with_root(temp.path());

        group.throughput(Throughput::Bytes((file_count * 1024) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(file_count),
            &config,
            |b, config| {
                b.iter(|| create_deployment_archive(black_box(config), &mut NoopObserver).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_should_exclude(c: &mut Criterion) {
    let paths = [
        "src/components/Dashboard/Chart.tsx",
        "node_modules/react-dom/cjs/react-dom.development.js",
        "backend/app/__pycache__/models.cpython-312.pyc",
        "public/assets/images/logo.svg",
    ];

    c.bench_function("should_exclude", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(should_exclude(black_box(Path::new(path))));
            }
        });
    });
}

criterion_group!(benches, bench_create_archive, bench_should_exclude);
criterion_main!(benches);
