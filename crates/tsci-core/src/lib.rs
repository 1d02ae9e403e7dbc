//! # tsci-core
//!
//! Core types and errors shared across the tsci crates.
//!
//! This crate provides:
//! - Registry package shapes (`RegistryPackage`, `RegistrySearchResponse`, `PackageDetails`)
//! - `ComponentCategory` and the `ComponentAnalysis` result
//! - `TsciError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Domain data types produced by the registry access layer
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{TsciError, TsciResult};
pub use types::{
    ComponentAnalysis, ComponentCategory, ComponentMetadata, Downloads, GithubStats,
    PackageAuthor, PackageDetails, PackageLinks, RegistryPackage, RegistrySearchResponse,
    RegistrySearchResult, ScoreDetail, SearchScore, SpecValue,
};
