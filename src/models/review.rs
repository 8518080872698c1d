use serde::Deserialize;
use serde_json::Value;

use crate::util::present;

#[derive(Debug, Deserialize)]
pub struct CreateReview {
    #[serde(default, deserialize_with = "present")]
    pub product_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Value>,
    /// Stored and served back verbatim; the client renders it as HTML.
    #[serde(default, deserialize_with = "present")]
    pub comment: Option<Value>,
}
