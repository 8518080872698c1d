use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::AppState;
use crate::error::Result;
use crate::expr;
use crate::extractors::Json;
use crate::util::{present, splice};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the thank-you message, then render any `${...}` it contains.
pub async fn feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Json<FeedbackResponse> {
    let template = format!(
        "Thank you {}, your feedback has been received: \"{}\"",
        splice(req.name.as_ref()),
        splice(req.message.as_ref())
    );

    let rendered: Result<String> = state
        .db
        .get()
        .map_err(Into::into)
        .and_then(|conn| expr::render_template(&conn, &template));

    Json(match rendered {
        Ok(response) => FeedbackResponse {
            success: true,
            response: Some(response),
            error: None,
        },
        Err(e) => FeedbackResponse {
            success: false,
            response: None,
            error: Some(e.to_string()),
        },
    })
}

#[derive(Debug, Deserialize)]
pub struct DebugRequest {
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Evaluate `code` against the live database.
///
/// Only strings are evaluated; any other value is its own result.
pub async fn debug_eval(
    State(state): State<AppState>,
    Json(req): Json<DebugRequest>,
) -> Json<DebugResponse> {
    let evaluated: Result<String> = match &req.code {
        Some(Value::String(code)) => {
            tracing::warn!("Debug eval: {}", code);
            state
                .db
                .get()
                .map_err(Into::into)
                .and_then(|conn| expr::evaluate(&conn, code))
        }
        other => Ok(splice(other.as_ref())),
    };

    Json(match evaluated {
        Ok(output) => DebugResponse {
            success: true,
            input: req.code,
            output: Some(output),
            error: None,
        },
        Err(e) => DebugResponse {
            success: false,
            input: req.code,
            output: None,
            error: Some(e.to_string()),
        },
    })
}
