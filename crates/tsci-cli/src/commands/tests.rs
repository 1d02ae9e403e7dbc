//! Unit tests for CLI commands.

use super::*;
use crate::output::colors::ColorSupport;
use crate::Cli;
use clap::Parser;
use serde_json::{json, Value};
use tempfile::TempDir;
use tsci_core::types::{ComponentCategory, RegistrySearchResponse};
use tsci_registry::{ClientConfig, SearchParams};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test command context against a stub registry
fn create_test_context(temp_dir: &TempDir, server: &MockServer) -> CommandContext {
    CommandContext {
        cwd: Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap(),
        output: OutputHandler::plain(),
        client: RegistryClient::with_config(ClientConfig::with_base_url(server.uri())).unwrap(),
        json: false,
    }
}

async fn stub_search(server: &MockServer, query: &str, packages: Value) {
    Mock::given(method("POST"))
        .and(path("/packages/search"))
        .and(body_json(json!({ "query": query })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "packages": packages })))
        .mount(server)
        .await;
}

fn parse_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_cli_parses_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tsci",
        "search",
        "led",
        "--limit",
        "3",
        "--category",
        "LED",
        "--json",
        "--timeout-ms",
        "2500",
    ])
    .unwrap();

    assert!(cli.json);
    match &cli.command {
        Commands::Search { query, limit, category } => {
            assert_eq!(query, "led");
            assert_eq!(*limit, Some(3));
            assert_eq!(*category, Some(ComponentCategory::Led));
        }
        _ => panic!("Expected search command"),
    }

    let overrides = cli.config_overrides();
    assert_eq!(overrides.get("timeout-ms").map(String::as_str), Some("2500"));
    assert!(!overrides.contains_key("registry-url"));
}

#[test]
fn test_cli_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["tsci", "search", "led", "--category", "gizmo"]).is_err());
}

#[test]
fn test_version_runs_without_configuration() {
    let cli = Cli::try_parse_from(["tsci", "version", "--registry-url", "not a url", "--timeout-ms", "0"]).unwrap();
    let output = OutputHandler::plain();

    let result = run_standalone(&cli.command, &output, true).expect("version needs no context");
    assert!(result.is_ok());
    assert!(run_standalone(&cli.command, &output, false).unwrap().is_ok());

    let cli = Cli::try_parse_from(["tsci", "details", "seveibar/red-led"]).unwrap();
    assert!(run_standalone(&cli.command, &output, false).is_none());
}

#[test]
fn test_render_search() {
    let response: RegistrySearchResponse = serde_json::from_value(json!({
        "objects": [{
            "package": {
                "name": "seveibar/red-led",
                "version": "0.0.3",
                "description": "A red LED",
                "keywords": [],
                "links": { "npm": "https://www.npmjs.com/package/@tsci/seveibar/red-led" }
            },
            "score": { "final": 4.0, "detail": { "quality": 1.0, "popularity": 4.0, "maintenance": 1.0 } }
        }],
        "total": 3,
        "time": "2026-01-01T00:00:00.000Z"
    }))
    .unwrap();

    let lines = search::render("led", &response, &ColorSupport::disabled());

    assert_eq!(lines[0], "Found 3 packages for 'led' (showing 1)");
    assert_eq!(lines[1], "  seveibar/red-led@0.0.3 ★ 4");
    assert_eq!(lines[2], "      A red LED");
    assert_eq!(lines[3], "      https://www.npmjs.com/package/@tsci/seveibar/red-led");
}

#[test]
fn test_render_empty_search() {
    let response = RegistrySearchResponse {
        objects: Vec::new(),
        total: 0,
        time: "2026-01-01T00:00:00.000Z".to_string(),
    };
    assert_eq!(
        search::render("nothing", &response, &ColorSupport::disabled()),
        vec!["No packages found for 'nothing'".to_string()]
    );
}

#[tokio::test]
async fn test_details_and_analysis_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    stub_search(
        &server,
        "seveibar/led-driver",
        json!([{ "name": "seveibar/led-driver", "latest_version": "1.0.0", "description": "SOT-23 3.3V LED driver" }]),
    )
    .await;
    let ctx = create_test_context(&temp_dir, &server);

    let details = ctx
        .client
        .get_package_details(&tsci_registry::PackageDetailsParams {
            package_name: "seveibar/led-driver".to_string(),
        })
        .await
        .unwrap();
    let lines = details::render(&details, &ColorSupport::disabled());
    assert_eq!(lines[0], "seveibar/led-driver@1.0.0");
    assert!(lines.contains(&"license:    unset".to_string()));
    assert!(lines.contains(&"versions:   1.0.0".to_string()));

    let analysis = ctx
        .client
        .analyze_component(&tsci_registry::AnalyzeParams {
            package_name: "seveibar/led-driver".to_string(),
        })
        .await
        .unwrap();
    let lines = analyze::render(&analysis, &ColorSupport::disabled());
    assert_eq!(lines[1], "category: led");
    assert!(lines.contains(&"  footprint: SOT-23".to_string()));
    assert!(lines.contains(&"  voltage: 3.3".to_string()));
}

#[tokio::test]
async fn test_batch_dispatches_operations() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    stub_search(&server, "led", json!([{ "name": "seveibar/red-led" }, { "name": "acme/blue-led" }])).await;
    let ctx = create_test_context(&temp_dir, &server);

    let input = concat!(
        r#"{"id": 1, "op": "searchPackages", "params": {"query": "led", "limit": 1}}"#,
        "\n",
        "\n",
        r#"{"id": "stats", "op": "getCacheStats"}"#,
        "\n",
        r#"{"id": 3, "op": "clearCache"}"#,
        "\n",
        r#"{"op": "getCacheStats"}"#,
        "\n",
    );
    let mut output = Vec::new();
    let handled = batch::serve(&ctx.client, input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(handled, 4);
    let responses = parse_lines(&output);

    assert_eq!(responses[0]["id"], json!(1));
    assert_eq!(responses[0]["ok"], json!(true));
    assert_eq!(responses[0]["result"]["total"], json!(2));
    assert_eq!(responses[0]["result"]["objects"][0]["package"]["name"], json!("seveibar/red-led"));

    assert_eq!(responses[1]["id"], json!("stats"));
    assert_eq!(responses[1]["result"]["size"], json!(1));

    assert_eq!(responses[2]["ok"], json!(true));
    assert_eq!(responses[2]["result"], Value::Null);

    assert_eq!(responses[3]["id"], Value::Null);
    assert_eq!(responses[3]["result"]["size"], json!(0));
}

#[tokio::test]
async fn test_batch_reports_failures_per_line() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    stub_search(&server, "ghost", json!([])).await;
    let ctx = create_test_context(&temp_dir, &server);

    let response = batch::handle_line(&ctx.client, "not json").await;
    assert!(!response.ok);
    assert!(response.error.unwrap().starts_with("Malformed request"));

    let response = batch::handle_line(&ctx.client, r#"{"id": 7, "params": {}}"#).await;
    assert_eq!(response.id, json!(7));
    assert!(response.error.unwrap().starts_with("Malformed request"));

    let response = batch::handle_line(&ctx.client, r#"{"id": 8, "op": "deletePackage"}"#).await;
    assert_eq!(response.error.as_deref(), Some("Unknown operation 'deletePackage'"));

    let response = batch::handle_line(&ctx.client, r#"{"id": 9, "op": "getPackageCode", "params": {}}"#).await;
    assert!(response.error.unwrap().starts_with("Invalid params for getPackageCode"));

    let response =
        batch::handle_line(&ctx.client, r#"{"id": 10, "op": "getPackageDetails", "params": {"packageName": "ghost"}}"#)
            .await;
    assert!(!response.ok);
    assert_eq!(
        response.error.as_deref(),
        Some("Failed to get package details: Package \"ghost\" not found")
    );
}

#[tokio::test]
async fn test_batch_search_matches_direct_call() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    stub_search(&server, "cap", json!([{ "name": "acme/capacitor-100nf" }, { "name": "acme/resistor" }])).await;
    let ctx = create_test_context(&temp_dir, &server);

    let via_batch = batch::dispatch(
        &ctx.client,
        "searchPackages",
        json!({ "query": "cap", "category": "capacitor" }),
    )
    .await
    .unwrap();
    let direct = ctx
        .client
        .search_packages(&SearchParams::new("cap").category(ComponentCategory::Capacitor))
        .await
        .unwrap();

    assert_eq!(via_batch, serde_json::to_value(&direct).unwrap());
    assert_eq!(via_batch["total"], json!(1));
}
