//! Heuristic component classification and electrical-spec extraction

use std::collections::BTreeMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tsci_core::types::{ComponentCategory, PackageDetails, RegistryPackage, SpecValue};

/// How a category is recognized in package text
struct CategoryRule {
    category: ComponentCategory,
    /// Substring that marks the category in a description
    description_term: &'static str,
}

/// Classification order. First match wins, so this order decides ties
/// ("led-ic-driver" is an `ic`).
static CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    ComponentCategory::ALL
        .iter()
        .copied()
        .filter(|category| *category != ComponentCategory::Other)
        .map(|category| CategoryRule {
            category,
            description_term: match category {
                // A bare "ic" hides inside words like "basic" and "magnetic"
                ComponentCategory::Ic => "integrated circuit",
                other => other.as_str(),
            },
        })
        .collect()
});

impl CategoryRule {
    fn matches(&self, package: &RegistryPackage, description: &str, name: &str) -> bool {
        let token = self.category.as_str();
        package.has_keyword(token)
            || description.contains(self.description_term)
            || name.contains(token)
    }
}

/// Infer the category of a package.
///
/// An explicit category tag in the package metadata always wins; a tag naming
/// no known category yields `Other`.
pub fn infer_category(details: &PackageDetails) -> ComponentCategory {
    let package = &details.package;

    if let Some(tag) = package.tscircuit.as_ref().and_then(|meta| meta.category.as_deref()) {
        return tag.parse().unwrap_or(ComponentCategory::Other);
    }

    let description = package.description.to_lowercase();
    let name = package.name.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(package, &description, &name))
        .map(|rule| rule.category)
        .unwrap_or(ComponentCategory::Other)
}

/// One extraction rule: a label, a pattern whose first group is the value,
/// and a parser for that group
struct SpecPattern {
    label: &'static str,
    pattern: Regex,
    parse: fn(&str) -> Option<SpecValue>,
}

fn number(raw: &str) -> Option<SpecValue> {
    raw.parse::<f64>().ok().map(SpecValue::Number)
}

fn package_code(raw: &str) -> Option<SpecValue> {
    Some(SpecValue::Text(raw.to_uppercase()))
}

fn spec_pattern(label: &'static str, pattern: &str, parse: fn(&str) -> Option<SpecValue>) -> SpecPattern {
    SpecPattern {
        label,
        pattern: Regex::new(pattern).expect("spec pattern must compile"),
        parse,
    }
}

// Units are not disambiguated: "10k" and "10m" both yield resistance 10.
static SPEC_PATTERNS: Lazy<Vec<SpecPattern>> = Lazy::new(|| {
    vec![
        spec_pattern("voltage", r"([0-9]+(?:\.[0-9]+)?)\s*v(?:olt)?", number),
        spec_pattern("current", r"([0-9]+(?:\.[0-9]+)?)\s*(?:ma|amp|ampere)", number),
        spec_pattern("resistance", r"([0-9]+(?:\.[0-9]+)?)\s*(?:ohm|Ω|ω|k|m)", number),
        spec_pattern("capacitance", r"([0-9]+(?:\.[0-9]+)?)\s*(?:pf|nf|uf|farad)", number),
        spec_pattern(
            "footprint",
            r"(sot-23|sot-89|to-220|dip|smd|0805|0603|1206|bga|qfn|soic|ssop|tssop|lqfp)",
            package_code,
        ),
    ]
});

/// Extract electrical specs from a description and keywords.
///
/// Each pattern contributes its first match only; unmatched labels are absent.
pub fn extract_specs(description: &str, keywords: &[String]) -> BTreeMap<String, SpecValue> {
    let text = format!("{} {}", description, keywords.join(" ")).to_lowercase();

    SPEC_PATTERNS
        .iter()
        .filter_map(|spec| {
            let captured = spec.pattern.captures(&text)?.get(1)?;
            let value = (spec.parse)(captured.as_str())?;
            Some((spec.label.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests;
