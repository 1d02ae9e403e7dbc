//! `tsci analyze`

use tsci_core::error::TsciResult;
use tsci_core::types::{ComponentAnalysis, SpecValue};
use tsci_registry::AnalyzeParams;

use super::CommandContext;
use crate::output::colors::ColorSupport;

pub async fn execute(package: String, ctx: &CommandContext) -> TsciResult<()> {
    let analysis = ctx
        .client
        .analyze_component(&AnalyzeParams { package_name: package })
        .await?;

    if ctx.json {
        return ctx.output.json(&analysis);
    }

    for line in render(&analysis, ctx.output.colors()) {
        ctx.output.data(&line);
    }
    Ok(())
}

fn spec_text(value: &SpecValue) -> String {
    match value {
        SpecValue::Number(n) => n.to_string(),
        SpecValue::Text(s) => s.clone(),
    }
}

/// Human-readable analysis report
pub fn render(analysis: &ComponentAnalysis, colors: &ColorSupport) -> Vec<String> {
    let mut lines = vec![
        format!("{}@{}", colors.bold(&analysis.name), analysis.version),
        format!("category: {}", colors.green(analysis.category.as_str())),
    ];

    if let Some(footprint) = &analysis.footprint {
        lines.push(format!("footprint: {}", footprint));
    }

    if analysis.estimated_specs.is_empty() {
        lines.push("estimated specs: none".to_string());
    } else {
        lines.push("estimated specs:".to_string());
        for (label, value) in &analysis.estimated_specs {
            lines.push(format!("  {}: {}", label, spec_text(value)));
        }
    }

    if !analysis.specifications.is_empty() {
        lines.push("declared specs:".to_string());
        for (label, value) in &analysis.specifications {
            lines.push(format!("  {}: {}", label, value));
        }
    }

    if !analysis.dependencies.is_empty() {
        lines.push(format!("dependencies: {}", analysis.dependencies.len()));
    }

    lines
}
