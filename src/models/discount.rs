use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::present;

/// Known codes and their percentage.
pub const DISCOUNT_CODES: &[(&str, i64)] = &[("IDN20", 20)];

pub fn discount_percent(code: &str) -> Option<i64> {
    DISCOUNT_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, percent)| *percent)
}

#[derive(Debug, Deserialize)]
pub struct ApplyDiscount {
    #[serde(default, deserialize_with = "present")]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub product_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ResetDiscount {
    #[serde(default, deserialize_with = "present")]
    pub product_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DiscountApplied {
    pub success: bool,
    pub code: String,
    pub discount_percent: i64,
    pub times_applied: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DiscountStatus {
    NotApplied {
        applied: bool,
    },
    Applied {
        applied: bool,
        code: Value,
        discount_percent: f64,
        times_applied: usize,
    },
}
