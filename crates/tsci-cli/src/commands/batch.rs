//! `tsci batch`: line-delimited JSON requests on stdin, one response per line on stdout.
//!
//! A request is `{"id"?, "op", "params"?}` where `op` names one of the registry
//! operations; the response echoes `id` with either `ok: true` and `result`,
//! or `ok: false` and `error`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tsci_core::error::{TsciError, TsciResult};
use tsci_registry::{AnalyzeParams, PackageCodeParams, PackageDetailsParams, RegistryClient, SearchParams};

use super::CommandContext;

/// One request line
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub id: Value,
    pub op: String,
    #[serde(default)]
    pub params: Value,
}

/// One response line
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, error: &BatchError) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Why a request line produced no result
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("Invalid params for {op}: {reason}")]
    InvalidParams { op: String, reason: String },

    #[error(transparent)]
    Registry(#[from] TsciError),
}

/// Read requests until EOF, SIGINT or SIGTERM
pub async fn execute(ctx: &CommandContext) -> TsciResult<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        served = serve(&ctx.client, stdin, stdout) => {
            let handled = served?;
            info!("Input closed after {} requests", handled);
            Ok(())
        }
        signal = shutdown_signal() => {
            let name = signal
                .map_err(|e| TsciError::io("Failed to install signal handlers".to_string(), e))?;
            info!("Received {}, shutting down", name);
            Ok(())
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => Ok("SIGINT"),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

/// Answer every non-blank line of `reader` on `writer`; returns the number answered
pub async fn serve<R, W>(client: &RegistryClient, reader: R, mut writer: W) -> TsciResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| TsciError::io("Failed to read request".to_string(), e))?
    {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(client, &line).await;
        let mut encoded = serde_json::to_vec(&response)
            .map_err(|e| TsciError::io("Failed to encode response".to_string(), e.into()))?;
        encoded.push(b'\n');

        writer
            .write_all(&encoded)
            .await
            .map_err(|e| TsciError::io("Failed to write response".to_string(), e))?;
        writer
            .flush()
            .await
            .map_err(|e| TsciError::io("Failed to write response".to_string(), e))?;
        handled += 1;
    }

    Ok(handled)
}

/// Parse and answer one request line
pub async fn handle_line(client: &RegistryClient, line: &str) -> BatchResponse {
    let request: BatchRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting malformed request: {}", e);
            // Echo the id when the line is an object with one
            let id = serde_json::from_str::<Value>(line)
                .ok()
                .and_then(|value| value.get("id").cloned())
                .unwrap_or(Value::Null);
            return BatchResponse::failure(id, &BatchError::Malformed(e.to_string()));
        }
    };

    debug!("Batch request {} ({})", request.op, request.id);
    match dispatch(client, &request.op, request.params).await {
        Ok(result) => BatchResponse::success(request.id, result),
        Err(e) => BatchResponse::failure(request.id, &e),
    }
}

fn params<T: serde::de::DeserializeOwned>(op: &str, params: Value) -> Result<T, BatchError> {
    serde_json::from_value(params).map_err(|e| BatchError::InvalidParams {
        op: op.to_string(),
        reason: e.to_string(),
    })
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, BatchError> {
    serde_json::to_value(value).map_err(|e| {
        BatchError::Registry(TsciError::io("Failed to encode result".to_string(), e.into()))
    })
}

/// Run one registry operation by name
pub async fn dispatch(client: &RegistryClient, op: &str, raw_params: Value) -> Result<Value, BatchError> {
    match op {
        "searchPackages" => {
            let request: SearchParams = params(op, raw_params)?;
            to_result(&client.search_packages(&request).await?)
        }
        "getPackageDetails" => {
            let request: PackageDetailsParams = params(op, raw_params)?;
            to_result(&client.get_package_details(&request).await?)
        }
        "getPackageCode" => {
            let request: PackageCodeParams = params(op, raw_params)?;
            Ok(Value::String(client.get_package_code(&request).await?))
        }
        "analyzeComponent" => {
            let request: AnalyzeParams = params(op, raw_params)?;
            to_result(&client.analyze_component(&request).await?)
        }
        "clearCache" => {
            client.clear_cache();
            Ok(Value::Null)
        }
        "getCacheStats" => to_result(&client.cache_stats()),
        other => Err(BatchError::UnknownOperation(other.to_string())),
    }
}
