//! Search pipeline stages and best-effort package resolution

use tsci_core::types::RegistrySearchResult;

use crate::api::RawPackage;

/// Number of hits returned when the caller gives no limit
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Breadth of the search behind a package-details lookup
pub const DETAILS_SEARCH_LIMIT: usize = 50;

/// Keep packages whose name, description or AI description mentions `category`.
///
/// This is a case-insensitive substring test, so "led" also keeps "sled-mount".
pub fn filter_by_category(packages: Vec<RawPackage>, category: &str) -> Vec<RawPackage> {
    let needle = category.to_lowercase();
    packages
        .into_iter()
        .filter(|pkg| {
            contains_ci(Some(&pkg.name), &needle)
                || contains_ci(pkg.description.as_ref(), &needle)
                || contains_ci(pkg.ai_description.as_ref(), &needle)
        })
        .collect()
}

/// Truncate by position; the registry order is trusted as relevance order.
/// A limit of zero keeps everything.
pub fn apply_limit<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        items.truncate(limit);
    }
    items
}

/// Pick the search hit that best matches `target`.
///
/// Tiers, each scanned over the whole list before the next: exact name,
/// name ending in `/target`, name containing `target`.
pub fn resolve_details<'a>(
    results: &'a [RegistrySearchResult],
    target: &str,
) -> Option<&'a RegistrySearchResult> {
    let suffix = format!("/{}", target);

    results
        .iter()
        .find(|r| r.package.name == target)
        .or_else(|| results.iter().find(|r| r.package.name.ends_with(&suffix)))
        .or_else(|| results.iter().find(|r| r.package.name.contains(target)))
}

fn contains_ci(haystack: Option<&String>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}
