use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;

use crate::db::AppState;
use crate::extractors::Json;
use crate::util::{present, splice};

#[derive(Debug, Deserialize)]
pub struct PingRequest {
    #[serde(default, deserialize_with = "present")]
    pub host: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub command: String,
    pub output: String,
    /// `null` when the process was killed or never started.
    #[serde(rename = "exitCode")]
    pub exit_code: Option<i32>,
}

/// Run `ping -c 4 <host>` through the shell. The host is not checked, so
/// anything after it on the command line runs too.
pub async fn ping_host(
    State(state): State<AppState>,
    Json(req): Json<PingRequest>,
) -> Json<PingResponse> {
    let command = format!("ping -c 4 {}", splice(req.host.as_ref()));
    tracing::info!("Running: {}", command);

    let child = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .kill_on_drop(true)
        .output();

    let (output, exit_code) = match tokio::time::timeout(state.config.command_timeout, child).await
    {
        Ok(Ok(out)) => {
            let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
            let text = if !stdout.is_empty() {
                stdout
            } else if !stderr.is_empty() {
                stderr
            } else if !out.status.success() {
                format!("Command failed: {}", command)
            } else {
                "No output".to_string()
            };
            (text, out.status.code())
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to spawn shell: {}", e);
            (e.to_string(), None)
        }
        Err(_) => (
            format!(
                "Command timed out after {}s: {}",
                state.config.command_timeout.as_secs(),
                command
            ),
            None,
        ),
    };

    Json(PingResponse {
        command,
        output,
        exit_code,
    })
}
