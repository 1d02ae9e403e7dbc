//! Core data types for the registry access layer.
//!
//! This module provides the fundamental types used throughout tsci:
//! - Registry package, search and detail shapes
//! - Component categories
//! - Component analysis results

pub mod analysis;
pub mod category;
pub mod package;

// Re-export all public types
pub use analysis::{ComponentAnalysis, SpecValue};
pub use category::{ComponentCategory, ParseCategoryError};
pub use package::{
    ComponentMetadata, Downloads, GithubStats, PackageAuthor, PackageDetails, PackageLinks,
    RegistryPackage, RegistrySearchResponse, RegistrySearchResult, ScoreDetail, SearchScore,
};
