use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("record rejected")]
    RecordRejected { reasons: Vec<String> },

    #[error("attribute '{attribute}' has no literal form (expected a string or number)")]
    InvalidValue { attribute: String },

    #[error("no pending records to seal")]
    NothingToSeal,

    #[error("ledger error: {0}")]
    Ledger(#[from] chainscript_ledger::LedgerError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, reasons) = match self {
            ServerError::RecordRejected { reasons } => {
                (StatusCode::UNPROCESSABLE_ENTITY, reasons)
            }
            ServerError::InvalidValue { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, vec![message])
            }
            ServerError::NothingToSeal => (StatusCode::CONFLICT, vec![message]),
            ServerError::Ledger(_) | ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, vec![message])
            }
        };
        (status, Json(ErrorResponse { errors: reasons })).into_response()
    }
}
