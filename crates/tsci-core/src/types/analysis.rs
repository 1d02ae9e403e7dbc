//! Component analysis results.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ComponentCategory;

/// A value pulled out of free text by spec extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Text(String),
}

impl SpecValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => Some(*n),
            SpecValue::Text(_) => None,
        }
    }
}

/// Heuristic analysis of one component package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    pub name: String,
    pub description: String,
    pub category: ComponentCategory,
    /// Specifications declared by the package metadata, if any
    pub specifications: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footprint: Option<String>,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    /// Values extracted from description and keywords; missing keys were not found
    pub estimated_specs: BTreeMap<String, SpecValue>,
}
