//! Mapping raw registry packages into the stable response shapes

use chrono::{SecondsFormat, Utc};
use tsci_core::types::{
    PackageLinks, RegistryPackage, RegistrySearchResponse, RegistrySearchResult, SearchScore,
};

use crate::api::RawPackage;

/// Prefix of the synthesized npm link
pub const NPM_PACKAGE_BASE: &str = "https://www.npmjs.com/package/@tsci/";

/// Npm URL for a registry package name; not checked for existence
pub fn npm_link(name: &str) -> String {
    format!("{}{}", NPM_PACKAGE_BASE, name)
}

/// Convert one raw search hit
pub fn normalize_package(raw: &RawPackage) -> RegistrySearchResult {
    let description = non_empty(&raw.description)
        .or_else(|| non_empty(&raw.ai_description))
        .unwrap_or_default()
        .to_string();
    let popularity = raw.star_count.unwrap_or(0.0);

    RegistrySearchResult {
        package: RegistryPackage {
            name: raw.name.clone(),
            version: raw.latest_version.clone().unwrap_or_default(),
            description,
            keywords: Vec::new(),
            links: PackageLinks {
                npm: npm_link(&raw.name),
                homepage: raw.website.clone(),
                repository: raw.website.clone(),
            },
            author: None,
            license: None,
            dependencies: None,
            dev_dependencies: None,
            tscircuit: None,
        },
        score: SearchScore::from_popularity(popularity),
    }
}

/// Build the response for an already filtered and truncated hit list
pub fn normalize_search(kept: &[RawPackage], total: usize) -> RegistrySearchResponse {
    RegistrySearchResponse {
        objects: kept.iter().map(normalize_package).collect(),
        total,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
