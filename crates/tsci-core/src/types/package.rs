//! Registry package types.
//!
//! Stable shapes handed to callers of the registry access layer. These are
//! built per request from raw registry responses and are never persisted.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A component package as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPackage {
    /// Unique name in "owner/name" form
    pub name: String,
    pub version: String,
    pub description: String,
    /// Always empty for search results; the registry does not return keywords there
    #[serde(default)]
    pub keywords: Vec<String>,
    pub links: PackageLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<PackageAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    /// Component metadata, when the registry tags it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tscircuit: Option<ComponentMetadata>,
}

/// Links attached to a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageLinks {
    /// Synthesized npm URL; not guaranteed to resolve
    pub npm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Component metadata carried by a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    /// Explicit category tag; trusted over any inference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, Value>>,
}

/// One hit of a registry search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySearchResult {
    pub package: RegistryPackage,
    pub score: SearchScore,
}

/// Search score.
///
/// `final_score` is the raw star count, not a normalized quality metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchScore {
    #[serde(rename = "final")]
    pub final_score: f64,
    pub detail: ScoreDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub quality: f64,
    pub popularity: f64,
    pub maintenance: f64,
}

impl SearchScore {
    /// Score derived from a popularity counter alone
    pub fn from_popularity(popularity: f64) -> Self {
        Self {
            final_score: popularity,
            detail: ScoreDetail {
                quality: 1.0,
                popularity,
                maintenance: 1.0,
            },
        }
    }
}

/// Normalized search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySearchResponse {
    /// Hits in registry relevance order, filtered then truncated
    pub objects: Vec<RegistrySearchResult>,
    /// Number of hits after filtering, before truncation
    pub total: usize,
    /// ISO-8601 timestamp of response construction
    pub time: String,
}

/// Best-effort package details projected from a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    #[serde(flatten)]
    pub package: RegistryPackage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Latest version only
    pub versions: Vec<String>,
    /// The registry exposes no download counts; always zero
    pub downloads: Downloads,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Downloads {
    pub weekly: u64,
    pub monthly: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub stars_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
}

impl RegistryPackage {
    /// Check if this package carries a keyword (case-insensitive)
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

impl PackageDetails {
    /// Project a search hit into package details
    pub fn from_package(mut package: RegistryPackage) -> Self {
        // Registry packages do not declare a license
        package.license = Some("unset".to_string());
        let versions = vec![package.version.clone()];
        Self {
            package,
            readme: None,
            versions,
            downloads: Downloads::default(),
            github: None,
        }
    }
}
