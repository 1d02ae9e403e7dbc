//! tscircuit registry API request and response types

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /packages/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Response of `POST /packages/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub packages: Vec<RawPackage>,
    pub error: Option<ApiError>,
}

/// The registry sends `null` for some empty lists
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A package as the search endpoint returns it
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPackage {
    /// Package name ("owner/name")
    pub name: String,
    pub latest_version: Option<String>,
    pub description: Option<String>,
    /// Description generated by the registry
    pub ai_description: Option<String>,
    pub star_count: Option<f64>,
    pub website: Option<String>,
    pub package_id: Option<String>,
    pub owner_github_username: Option<String>,
}

/// Body of `POST /package_files/list`
#[derive(Debug, Clone, Serialize)]
pub struct ListFilesRequest<'a> {
    pub package_name: &'a str,
    pub use_latest_version: bool,
}

/// Response of `POST /package_files/list`
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesResponse {
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub package_files: Vec<PackageFile>,
    pub error: Option<ApiError>,
}

/// A file belonging to a package release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageFile {
    pub package_file_id: String,
    pub file_path: String,
    pub package_release_id: Option<String>,
    pub created_at: Option<String>,
}

/// Error body the registry attaches to `ok: false` responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

impl ApiError {
    pub fn message(error: &Option<ApiError>) -> Option<&str> {
        error.as_ref().and_then(|e| e.message.as_deref())
    }
}
