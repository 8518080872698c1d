use axum::extract::State;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{AppState, JsonRow, queries};
use crate::error::Result;
use crate::extractors::{Json, Path, Query};

const DEFAULT_LOG_FILE: &str = "app.log";
const DATABASE_LOG_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
pub struct UserExport {
    pub export_date: String,
    pub total_users: usize,
    pub users: Vec<JsonRow>,
}

/// Every user row, password hashes included.
pub async fn export_users(State(state): State<AppState>) -> Result<Json<UserExport>> {
    let conn = state.db.get()?;
    let users = queries::export_users(&conn)?;
    Ok(Json(UserExport {
        export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        total_users: users.len(),
        users,
    }))
}

#[derive(Debug, Serialize)]
pub struct TableBackup {
    pub table: String,
    pub row_count: usize,
    pub data: Vec<JsonRow>,
}

/// `SELECT *` from whatever the path names.
pub async fn backup_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<TableBackup>> {
    let conn = state.db.get()?;
    let data = queries::dump_table(&conn, &table)?;
    Ok(Json(TableBackup {
        table,
        row_count: data.len(),
        data,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub f: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LogsResponse {
    File { filename: String, content: String },
    Database { filename: &'static str, entries: Vec<JsonRow> },
}

/// Read a log file by name.
///
/// The name is joined onto the logs directory (absolute names replace it,
/// `..` walks out of it). If that fails it is read relative to the working
/// directory, and if that fails too the latest database log rows are returned.
pub async fn read_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>> {
    let name = query
        .f
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let content = match tokio::fs::read_to_string(state.config.logs_dir.join(&name)).await {
        Ok(content) => Some(content),
        Err(_) => tokio::fs::read_to_string(&name).await.ok(),
    };

    if let Some(content) = content {
        return Ok(Json(LogsResponse::File {
            filename: name,
            content,
        }));
    }

    let conn = state.db.get()?;
    Ok(Json(LogsResponse::Database {
        filename: "database_logs",
        entries: queries::recent_logs(&conn, DATABASE_LOG_LIMIT)?,
    }))
}
