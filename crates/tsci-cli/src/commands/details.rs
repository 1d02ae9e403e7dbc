//! `tsci details`

use tsci_core::error::TsciResult;
use tsci_core::types::PackageDetails;
use tsci_registry::PackageDetailsParams;

use super::CommandContext;
use crate::output::colors::ColorSupport;

pub async fn execute(package: String, ctx: &CommandContext) -> TsciResult<()> {
    let details = ctx
        .client
        .get_package_details(&PackageDetailsParams { package_name: package })
        .await?;

    if ctx.json {
        return ctx.output.json(&details);
    }

    for line in render(&details, ctx.output.colors()) {
        ctx.output.data(&line);
    }
    Ok(())
}

/// Human-readable package summary
pub fn render(details: &PackageDetails, colors: &ColorSupport) -> Vec<String> {
    let package = &details.package;
    let mut lines = vec![format!("{}@{}", colors.bold(&package.name), package.version)];

    if !package.description.is_empty() {
        lines.push(package.description.clone());
    }
    lines.push(String::new());
    if let Some(license) = &package.license {
        lines.push(format!("license:    {}", license));
    }
    lines.push(format!("versions:   {}", details.versions.join(", ")));
    lines.push(format!("npm:        {}", colors.cyan(&package.links.npm)));
    if let Some(repository) = &package.links.repository {
        lines.push(format!("repository: {}", colors.cyan(repository)));
    }
    if !package.keywords.is_empty() {
        lines.push(format!("keywords:   {}", package.keywords.join(", ")));
    }

    lines
}
