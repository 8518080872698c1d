//! Plain-text request log under the logs directory.
//!
//! One line per request, readable back through `GET /api/admin/logs`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::db::AppState;
use crate::extractors::ClientIp;

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format one access log line.
pub fn access_line(method: &str, uri: &str, ip: &str) -> String {
    format!("[{}] {} {} – {}\n", timestamp(), method, uri, ip)
}

/// Create the logs directory and seed `app.log` if it does not exist yet.
pub fn init_access_log(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.logs_dir)?;
    let path = config.access_log_path();
    if path.exists() {
        return Ok(());
    }

    let lines = [
        format!("[{}] Application started", timestamp()),
        format!("[{}] Database ready: {}", timestamp(), config.database_path),
        format!("[{}] Listening on port {}", timestamp(), config.port),
        format!("[{}] WARNING: Debug endpoint active – /api/debug", timestamp()),
        String::new(),
    ];
    std::fs::write(path, lines.join("\n"))
}

/// Append a line per request. Failures are logged and otherwise ignored.
pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let line = access_line(
        parts.method.as_str(),
        &parts.uri.to_string(),
        &ClientIp::from_parts(&parts).0,
    );

    let path = state.config.access_log_path();
    let written = async {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = written {
        tracing::debug!("Could not append to {}: {}", path.display(), e);
    }

    next.run(Request::from_parts(parts, body)).await
}
