//! Registry façade: the four public operations plus cache management

use std::sync::Arc;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use tsci_core::error::TsciError;
use tsci_core::types::{
    ComponentAnalysis, ComponentCategory, PackageDetails, RegistrySearchResponse,
};

use crate::api::{ApiError, ListFilesRequest, ListFilesResponse, SearchRequest, SearchResponse};
use crate::cache::{cache_key, CacheStats, TtlCache, DEFAULT_TTL};
use crate::classify::{extract_specs, infer_category};
use crate::code::select_entry_file;
use crate::http::{BoundedHttpClient, RawResponse, RequestOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::normalize::normalize_search;
use crate::search::{apply_limit, filter_by_category, resolve_details, DEFAULT_SEARCH_LIMIT, DETAILS_SEARCH_LIMIT};
use crate::RegistryResult;

/// Production registry endpoint
pub const DEFAULT_BASE_URL: &str = "https://registry-api.tscircuit.com";

/// Settings for a [`RegistryClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry base URL
    pub base_url: String,
    /// Wall-clock bound for each HTTP request
    pub timeout: Duration,
    /// Lifetime of cached responses
    pub cache_ttl: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_TTL,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default settings against another registry
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Parameters of `search_packages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    /// Maximum hits (default 10, 0 for no truncation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ComponentCategory>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            category: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn category(mut self, category: ComponentCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// Parameters of `get_package_details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetailsParams {
    /// Preferably "owner/name"; bare names resolve best-effort
    pub package_name: String,
}

/// Parameters of `get_package_code`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCodeParams {
    pub package_name: String,
    /// Accepted but not honored: the latest release is always served
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Parameters of `analyze_component`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeParams {
    pub package_name: String,
}

/// Values held by the response cache
#[derive(Debug, Clone)]
enum CachedResponse {
    Search(RegistrySearchResponse),
    Details(PackageDetails),
    Code(String),
}

/// Client for the tscircuit registry.
///
/// Clones share one response cache.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Bounded HTTP transport
    http: BoundedHttpClient,
    /// Response cache, shared between clones
    cache: Arc<TtlCache<CachedResponse>>,
    /// Base registry URL, without trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create client for the production registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create client with custom configuration
    pub fn with_config(config: ClientConfig) -> RegistryResult<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| TsciError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: format!("'{}' is not a valid URL: {}", config.base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TsciError::ConfigValidation {
                field: "registry.url".to_string(),
                reason: format!("'{}' must use http or https", config.base_url),
            });
        }
        if config.timeout.is_zero() {
            return Err(TsciError::ConfigValidation {
                field: "registry.timeout-ms".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        let http = BoundedHttpClient::with_config(&config.user_agent, config.timeout)?;

        Ok(Self {
            http,
            cache: Arc::new(TtlCache::with_default_ttl(config.cache_ttl)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base registry URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the registry.
    ///
    /// Results keep registry order, are filtered by `category` (substring match)
    /// and truncated to `limit`; `total` counts hits before truncation.
    pub async fn search_packages(&self, params: &SearchParams) -> RegistryResult<RegistrySearchResponse> {
        self.search(params)
            .await
            .map_err(|e| e.in_operation("search packages"))
    }

    /// Resolve a package by searching for its name.
    ///
    /// There is no lookup endpoint, so the best hit of a 50-result search is
    /// used: exact name, then "/name" suffix, then substring.
    pub async fn get_package_details(&self, params: &PackageDetailsParams) -> RegistryResult<PackageDetails> {
        self.details(params)
            .await
            .map_err(|e| e.in_operation("get package details"))
    }

    /// Fetch the source of a package's entry file.
    ///
    /// The listing endpoint is always asked for the latest release, so a
    /// requested `version` does not change the code returned.
    pub async fn get_package_code(&self, params: &PackageCodeParams) -> RegistryResult<String> {
        self.code(params)
            .await
            .map_err(|e| e.in_operation("fetch package code"))
    }

    /// Classify a package and extract electrical specs from its text
    pub async fn analyze_component(&self, params: &AnalyzeParams) -> RegistryResult<ComponentAnalysis> {
        self.analyze(params)
            .await
            .map_err(|e| e.in_operation("analyze component"))
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        info!("Clearing registry response cache");
        self.cache.clear();
    }

    /// Cache size and keys
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn search(&self, params: &SearchParams) -> RegistryResult<RegistrySearchResponse> {
        let key = cache_key("search", params);
        if let Some(CachedResponse::Search(cached)) = self.cache.get(&key) {
            debug!("Cache hit: {}", key);
            return Ok(cached);
        }
        debug!("Cache miss: {}", key);

        info!("Searching registry for '{}'", params.query);
        let options = RequestOptions::post_json(&SearchRequest { query: &params.query })?;
        let response = self.http.send(&self.endpoint("packages/search"), options).await?;
        Self::ensure_success(&response, "Search failed")?;

        let body: SearchResponse = response.json()?;
        if !body.ok {
            return Err(TsciError::upstream(
                "Search failed",
                ApiError::message(&body.error),
                Some(response.status.as_u16()),
            ));
        }

        let mut packages = body.packages;
        if let Some(category) = params.category {
            packages = filter_by_category(packages, category.as_str());
        }
        let total = packages.len();
        let kept = apply_limit(packages, params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));
        debug!("Search '{}' kept {} of {} hits", params.query, kept.len(), total);

        let result = normalize_search(&kept, total);
        self.cache.set(key, CachedResponse::Search(result.clone()));
        Ok(result)
    }

    async fn details(&self, params: &PackageDetailsParams) -> RegistryResult<PackageDetails> {
        let key = cache_key("package", params);
        if let Some(CachedResponse::Details(cached)) = self.cache.get(&key) {
            debug!("Cache hit: {}", key);
            return Ok(cached);
        }
        debug!("Cache miss: {}", key);

        let search = SearchParams::new(params.package_name.clone()).limit(DETAILS_SEARCH_LIMIT);
        let results = self.search(&search).await?;

        let hit = resolve_details(&results.objects, &params.package_name).ok_or_else(|| {
            TsciError::PackageNotFound {
                name: params.package_name.clone(),
            }
        })?;
        if hit.package.name != params.package_name {
            debug!("Resolved '{}' to '{}'", params.package_name, hit.package.name);
        }

        let details = PackageDetails::from_package(hit.package.clone());
        self.cache.set(key, CachedResponse::Details(details.clone()));
        Ok(details)
    }

    async fn code(&self, params: &PackageCodeParams) -> RegistryResult<String> {
        let key = cache_key("code", params);
        if let Some(CachedResponse::Code(cached)) = self.cache.get(&key) {
            debug!("Cache hit: {}", key);
            return Ok(cached);
        }
        debug!("Cache miss: {}", key);

        if let Some(version) = &params.version {
            warn!(
                "Version {} requested for {}, but only the latest release can be fetched",
                version, params.package_name
            );
        }

        info!("Listing files of {}", params.package_name);
        let options = RequestOptions::post_json(&ListFilesRequest {
            package_name: &params.package_name,
            use_latest_version: true,
        })?;
        let response = self.http.send(&self.endpoint("package_files/list"), options).await?;
        Self::ensure_success(&response, "Failed to list package files")?;

        let listing: ListFilesResponse = response.json()?;
        if !listing.ok {
            return Err(TsciError::upstream(
                "Failed to list package files",
                ApiError::message(&listing.error),
                Some(response.status.as_u16()),
            ));
        }

        let entry = select_entry_file(&listing.package_files).ok_or_else(|| {
            TsciError::EntryFileNotFound {
                package: params.package_name.clone(),
            }
        })?;

        info!("Downloading {} from {}", entry.file_path, params.package_name);
        let download_url = self.download_url(&entry.package_file_id)?;
        let response = self.http.send(&download_url, RequestOptions::get()).await?;
        Self::ensure_success(&response, "Failed to download package file")?;

        if response.body.is_empty() {
            return Err(TsciError::EmptyResult {
                package: params.package_name.clone(),
            });
        }

        self.cache.set(key, CachedResponse::Code(response.body.clone()));
        Ok(response.body)
    }

    async fn analyze(&self, params: &AnalyzeParams) -> RegistryResult<ComponentAnalysis> {
        let details = self
            .details(&PackageDetailsParams {
                package_name: params.package_name.clone(),
            })
            .await?;

        let category = infer_category(&details);
        let estimated_specs = extract_specs(&details.package.description, &details.package.keywords);
        let package = details.package;
        let metadata = package.tscircuit.as_ref();

        Ok(ComponentAnalysis {
            category,
            specifications: metadata
                .and_then(|m| m.specifications.clone())
                .unwrap_or_default(),
            footprint: metadata.and_then(|m| m.footprint.clone()),
            repository: package.links.repository.clone(),
            npm: Some(package.links.npm.clone()),
            dependencies: package.dependencies.clone().unwrap_or_default(),
            name: package.name,
            description: package.description,
            keywords: package.keywords,
            version: package.version,
            license: package.license,
            estimated_specs,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn download_url(&self, package_file_id: &str) -> RegistryResult<String> {
        let mut url = Url::parse(&self.endpoint("package_files/download")).map_err(|e| {
            TsciError::ConfigValidation {
                field: "registry.url".to_string(),
                reason: format!("Cannot build download URL: {}", e),
            }
        })?;
        url.query_pairs_mut().append_pair("package_file_id", package_file_id);
        Ok(url.to_string())
    }

    /// Turn a non-2xx status into an upstream error, preferring the registry's own message
    fn ensure_success(response: &RawResponse, context: &str) -> RegistryResult<()> {
        if response.ok {
            return Ok(());
        }

        #[derive(Deserialize)]
        struct ErrorEnvelope {
            error: Option<ApiError>,
        }

        let registry_message = serde_json::from_str::<ErrorEnvelope>(&response.body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message);
        let detail = match registry_message {
            Some(message) => format!("{} ({})", response.status_line(), message),
            None => response.status_line(),
        };

        Err(TsciError::upstream(context, Some(&detail), Some(response.status.as_u16())))
    }
}
