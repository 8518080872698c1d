use axum::{
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::AppState;
use crate::extractors::Json;
use crate::util::{present, splice};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub source_url: String,
    pub content_type: Option<String>,
    /// Parsed JSON when the body is JSON, the raw text otherwise.
    pub data: Value,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct ExportFailed {
    pub error: &'static str,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
}

/// Fetch any URL from the server and hand back what came back.
pub async fn export_pdf(State(state): State<AppState>, Json(req): Json<ExportRequest>) -> Response {
    let url = splice(req.url.as_ref());
    tracing::info!("Export fetch: {}", url);

    match fetch(&state.http_client, &url).await {
        Ok(export) => Json(export).into_response(),
        Err(e) => {
            tracing::warn!("Export fetch of {} failed: {}", url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExportFailed {
                    error: "Failed to fetch URL",
                    details: e.to_string(),
                    url: req.url,
                }),
            )
                .into_response()
        }
    }
}

async fn fetch(client: &reqwest::Client, url: &str) -> reqwest::Result<ExportResponse> {
    let response = client.get(url).send().await?.error_for_status()?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response.text().await?;
    let data = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| Value::String(text));

    Ok(ExportResponse {
        success: true,
        source_url: url.to_string(),
        content_type,
        data,
        status,
    })
}
