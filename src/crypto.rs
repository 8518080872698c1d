use md5::{Digest, Md5};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::util::splice;

/// Hash a password for storage. Unsalted MD5, lowercase hex.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password straight from a request body, in its printed form.
/// A missing value cannot be hashed.
pub fn hash_password_input(value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Err(AppError::Internal(format!(
            "Illegal argument {}",
            splice(value)
        ))),
        Some(v) => Ok(hash_password(&splice(Some(v)))),
    }
}
