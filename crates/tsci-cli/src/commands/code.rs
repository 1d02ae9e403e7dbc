//! `tsci code`

use tsci_core::error::TsciResult;
use tsci_registry::PackageCodeParams;

use super::CommandContext;

pub async fn execute(package: String, version: Option<String>, ctx: &CommandContext) -> TsciResult<()> {
    if let Some(version) = &version {
        ctx.output
            .warn(&format!("Ignoring version {}: only the latest release can be fetched", version));
    }

    let params = PackageCodeParams {
        package_name: package,
        version,
    };
    let code = ctx.client.get_package_code(&params).await?;

    if ctx.json {
        return ctx.output.json(&serde_json::json!({
            "packageName": params.package_name,
            "code": code,
        }));
    }

    // Source is printed untouched so it can be piped into a file
    ctx.output.data(code.trim_end_matches('\n'));
    Ok(())
}
