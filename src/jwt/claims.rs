use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims we put into a token at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// The caller as described by a token or a `remember_me` cookie.
///
/// Fields are kept as raw JSON: whatever the client put in is what the
/// handlers splice into SQL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub username: Value,
    #[serde(default)]
    pub role: Value,
    /// Any other claims (`iat`, `exp`, attacker-supplied keys).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<TokenClaims> for SessionUser {
    fn from(claims: TokenClaims) -> Self {
        SessionUser {
            id: claims.id.into(),
            username: claims.username.into(),
            role: claims.role.into(),
            extra: Map::new(),
        }
    }
}
