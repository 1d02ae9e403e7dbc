//! `tsci search`

use tsci_core::error::TsciResult;
use tsci_core::types::{ComponentCategory, RegistrySearchResponse};
use tsci_registry::SearchParams;

use super::CommandContext;
use crate::output::colors::ColorSupport;

pub async fn execute(
    query: String,
    limit: Option<usize>,
    category: Option<ComponentCategory>,
    ctx: &CommandContext,
) -> TsciResult<()> {
    let params = SearchParams {
        query,
        limit,
        category,
    };
    let response = ctx.client.search_packages(&params).await?;

    if ctx.json {
        return ctx.output.json(&response);
    }

    for line in render(&params.query, &response, ctx.output.colors()) {
        ctx.output.data(&line);
    }
    Ok(())
}

/// Human-readable search listing
pub fn render(query: &str, response: &RegistrySearchResponse, colors: &ColorSupport) -> Vec<String> {
    if response.objects.is_empty() {
        return vec![format!("No packages found for '{}'", query)];
    }

    let mut lines = vec![format!(
        "Found {} package{} for '{}' (showing {})",
        response.total,
        if response.total == 1 { "" } else { "s" },
        query,
        response.objects.len()
    )];

    for hit in &response.objects {
        let package = &hit.package;
        let mut headline = format!("  {}@{}", colors.bold(&package.name), package.version);
        if hit.score.final_score > 0.0 {
            headline.push_str(&format!(" {}", colors.yellow(&format!("★ {}", hit.score.final_score))));
        }
        lines.push(headline);
        if !package.description.is_empty() {
            lines.push(format!("      {}", package.description));
        }
        lines.push(format!("      {}", colors.cyan(&package.links.npm)));
    }

    lines
}
