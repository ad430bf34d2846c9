use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use chainscript_types::{Block, Record};

use crate::api::{AddRecordRequest, AddRecordResponse, HealthResponse, SealResponse};
use crate::error::ServerResult;
use crate::state::SharedState;

/// Liveness probe.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// The sealed chain, genesis first.
pub async fn chain_handler(State(state): State<SharedState>) -> ServerResult<Json<Vec<Block>>> {
    Ok(Json(state.chain()?))
}

/// Records staged but not yet sealed.
pub async fn pending_handler(
    State(state): State<SharedState>,
) -> ServerResult<Json<Vec<Record>>> {
    Ok(Json(state.pending()?))
}

/// Validate and stage one record.
pub async fn add_record_handler(
    State(state): State<SharedState>,
    Json(request): Json<AddRecordRequest>,
) -> ServerResult<Json<AddRecordResponse>> {
    let pending = state.add_record(&request.fields)?;
    tracing::info!(ledger = state.ledger_name(), pending, "record staged");
    Ok(Json(AddRecordResponse {
        ledger: state.ledger_name().to_string(),
        pending,
    }))
}

/// Seal pending records into a new block.
pub async fn seal_handler(
    State(state): State<SharedState>,
) -> ServerResult<Json<SealResponse>> {
    let block = state.seal()?;
    tracing::info!(
        ledger = state.ledger_name(),
        index = block.index,
        "block sealed"
    );
    Ok(Json(SealResponse {
        ledger: state.ledger_name().to_string(),
        index: block.index,
        records: block.data.len(),
    }))
}

/// Snapshot download; a copy lands under the configured export directory.
pub async fn export_handler(State(state): State<SharedState>) -> ServerResult<Response> {
    let (bytes, filename) = state.export()?;
    tracing::info!(ledger = state.ledger_name(), %filename, "snapshot exported");
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
