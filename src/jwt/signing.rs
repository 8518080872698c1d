use base64::{
    Engine,
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD},
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use sha2::Sha256;

use super::{SessionUser, TokenClaims};
use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    #[serde(default)]
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignedClaims {
    #[serde(flatten)]
    claims: TokenClaims,
    iat: i64,
    nbf: i64,
    exp: i64,
}

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::Unauthorized(msg.into())
}

/// Decode a base64url segment, tolerating trailing padding.
fn decode_segment(segment: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| invalid(format!("Invalid token encoding: {}", e)))
}

fn decode_json<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T> {
    serde_json::from_slice(&decode_segment(segment)?)
        .map_err(|e| invalid(format!("Invalid token {}: {}", what, e)))
}

fn encode_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode token: {}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// HMAC over `header.payload`. Any secret length is accepted, however short.
fn mac(secret: &str, signing_input: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Sign a session token with the shared HS256 secret.
pub fn issue_token(secret: &str, claims: TokenClaims) -> Result<String> {
    let now = Utc::now().timestamp();
    let header = encode_json(&TokenHeader {
        alg: "HS256".to_string(),
        typ: Some("JWT".to_string()),
    })?;
    let payload = encode_json(&SignedClaims {
        claims,
        iat: now,
        nbf: now,
        exp: now + TOKEN_TTL_SECS,
    })?;

    let signing_input = format!("{}.{}", header, payload);
    let signature = mac(secret, &signing_input)?.finalize().into_bytes();
    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify a session token.
///
/// The algorithm is taken from the token's own header: `none` tokens are
/// accepted unsigned, anything else is checked as HS256. Either way the
/// payload's `exp` and `nbf` are enforced.
pub fn verify_token(token: &str, secret: &str) -> Result<SessionUser> {
    let parts: Vec<&str> = token.split('.').collect();
    let &[header_segment, payload_segment, signature_segment] = parts.as_slice() else {
        return Err(invalid("jwt malformed"));
    };

    let header: TokenHeader = decode_json(header_segment, "header")?;
    if header.alg.eq_ignore_ascii_case("none") {
        if !signature_segment.is_empty() {
            return Err(invalid("jwt signature is not allowed for alg none"));
        }
    } else if header.alg == "HS256" {
        let signature = decode_segment(signature_segment)?;
        mac(secret, &format!("{}.{}", header_segment, payload_segment))?
            .verify_slice(&signature)
            .map_err(|_| invalid("invalid signature"))?;
    } else {
        return Err(invalid("invalid algorithm"));
    }

    let user: SessionUser = decode_json(payload_segment, "payload")?;
    check_validity(&user, Utc::now().timestamp())?;
    Ok(user)
}

fn check_validity(user: &SessionUser, now: i64) -> Result<()> {
    let claim = |name: &str| user.extra.get(name).and_then(Value::as_f64);

    if let Some(exp) = claim("exp")
        && now as f64 >= exp
    {
        return Err(invalid("jwt expired"));
    }
    if let Some(nbf) = claim("nbf")
        && (now as f64) < nbf
    {
        return Err(invalid("jwt not active"));
    }
    Ok(())
}

/// Encode the `remember_me` cookie: base64 of the user JSON, no signature.
pub fn encode_remember_me(user: &SessionUser) -> Result<String> {
    let json = serde_json::to_vec(user)
        .map_err(|e| AppError::Internal(format!("Failed to encode cookie: {}", e)))?;
    Ok(BASE64.encode(json))
}

/// Decode a `remember_me` cookie. Whatever JSON it holds is trusted.
pub fn decode_remember_me(cookie: &str) -> Result<SessionUser> {
    let bytes = BASE64
        .decode(cookie.trim())
        .or_else(|_| URL_SAFE_NO_PAD.decode(cookie.trim().trim_end_matches('=')))
        .map_err(|e| invalid(format!("Invalid cookie encoding: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| invalid(format!("Invalid cookie payload: {}", e)))
}
