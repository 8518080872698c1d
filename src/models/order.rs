use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::present;

#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    #[serde(default, deserialize_with = "present")]
    pub product_id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Value>,
    /// Computed by the client. The server charges whatever arrives here.
    #[serde(default, deserialize_with = "present")]
    pub total_price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub shipping_address: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub discount_code: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    /// Echo of the submitted `total_price`, absent when none was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged: Option<Value>,
}
