use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Every variant renders its message verbatim into the response body.
/// Database and IO errors included: verbose errors are part of the lab.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// A balance check failed. The current balance is echoed back.
    #[error("{message}")]
    Funds { message: String, balance: f64 },

    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Pool(#[from] r2d2::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    MultipartBody(#[from] MultipartRejection),

    #[error("{0}")]
    JsonBody(#[from] JsonRejection),

    #[error("{0}")]
    QueryString(#[from] QueryRejection),

    #[error("{0}")]
    PathParam(#[from] PathRejection),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    balance: Option<f64>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_)
            | AppError::Funds { .. }
            | AppError::Multipart(_)
            | AppError::MultipartBody(_)
            | AppError::JsonBody(_)
            | AppError::QueryString(_)
            | AppError::PathParam(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let balance = match &self {
            AppError::Funds { balance, .. } => Some(*balance),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            balance,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
