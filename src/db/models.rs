use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Bank {
    pub id: i64,
    pub name: String,
}

/// A branch joined with its owning bank, as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchDetail {
    pub ifsc: String,
    pub branch: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub bank: Bank,
}
