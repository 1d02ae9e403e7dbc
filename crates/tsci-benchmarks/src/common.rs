//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use tsci_core::types::{PackageDetails, PackageLinks, RegistryPackage};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Package with the given text fields and no metadata
pub fn sample_details(name: &str, description: &str, keywords: &[&str]) -> PackageDetails {
    PackageDetails::from_package(RegistryPackage {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        links: PackageLinks {
            npm: format!("https://www.npmjs.com/package/@tsci/{}", name),
            homepage: None,
            repository: None,
        },
        author: None,
        license: None,
        dependencies: None,
        dev_dependencies: None,
        tscircuit: None,
    })
}
