use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::present;

pub const STARTING_BALANCE: f64 = 1000.0;

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub success: bool,
    pub balance: f64,
}

#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    pub success: bool,
    pub previous: f64,
    pub withdrawn: f64,
    pub new_balance: f64,
}
