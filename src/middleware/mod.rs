mod access_log;
mod session_auth;

pub use access_log::*;
pub use session_auth::*;

/// Tracks how a request was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization` header carrying a JWT (signed or `alg: none`)
    Jwt,
    /// Base64 JSON in the `remember_me` cookie
    Cookie,
}

impl AuthMethod {
    /// Human-readable description, as echoed by the admin secret endpoint.
    pub fn describe(&self) -> &'static str {
        match self {
            AuthMethod::Jwt => "Authenticated via JWT",
            AuthMethod::Cookie => "Authenticated via cookie",
        }
    }
}
