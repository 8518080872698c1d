use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{FromRow, JsonRow};
use crate::jwt::TokenClaims;
use crate::util::present;

/// Columns a profile lookup returns. Everything except the password hash.
pub const PROFILE_COLS: &str =
    "id, username, email, role, full_name, address, phone, avatar, bio, created_at";

/// Columns the profile update may set, including `role`.
pub const UPDATABLE_USER_FIELDS: &[&str] = &[
    "username",
    "email",
    "full_name",
    "address",
    "phone",
    "bio",
    "avatar",
    "role",
];

/// The account a login query matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            role: row.get("role")?,
            full_name: row.get("full_name")?,
            avatar: row.get("avatar")?,
        })
    }
}

impl User {
    pub fn token_claims(&self) -> TokenClaims {
        TokenClaims {
            id: self.id,
            username: self.username.clone(),
            role: self.role.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub remember: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdated {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<JsonRow>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub new_password: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub size: usize,
    pub mimetype: String,
}
