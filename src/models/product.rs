use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::present;

pub const DEFAULT_PRODUCT_IMAGE: &str = "/uploads/default-product.png";
pub const DEFAULT_PRODUCT_STOCK: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreated {
    pub success: bool,
    #[serde(rename = "productId")]
    pub product_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<crate::db::JsonRow>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
