//! Request and response bodies for the ledger front end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /v1/health` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `POST /v1/records` body: one candidate record, attribute→value.
///
/// Values arrive as plain JSON: strings stay strings, whole numbers become
/// integers, fractional numbers become floats. Anything else has no literal
/// form and is rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddRecordRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// `POST /v1/records` success body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddRecordResponse {
    pub ledger: String,
    pub pending: usize,
}

/// `POST /v1/seal` success body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SealResponse {
    pub ledger: String,
    pub index: u64,
    pub records: usize,
}

/// Error body for every non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}
