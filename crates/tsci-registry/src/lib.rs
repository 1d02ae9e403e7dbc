//! tscircuit registry client
//!
//! This crate lets a tool-calling agent discover, inspect and fetch source code
//! for electronic-component packages hosted in the tscircuit registry. Every
//! network call is bounded by a wall-clock timeout and responses are kept in an
//! in-memory TTL cache owned by the [`RegistryClient`].

pub mod api;
pub mod cache;
pub mod classify;
pub mod client;
pub mod code;
pub mod http;
pub mod normalize;
pub mod search;

// Re-export main types
pub use client::{
    AnalyzeParams, ClientConfig, PackageCodeParams, PackageDetailsParams, RegistryClient,
    SearchParams,
};
pub use http::{BoundedHttpClient, RawResponse, RequestOptions};
pub use cache::{CacheEntry, CacheStats, TtlCache};
pub use classify::{extract_specs, infer_category};
pub use code::select_entry_file;
pub use search::resolve_details;

use tsci_core::error::TsciError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, TsciError>;
