use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::SharedState;

/// Build the axum router over shared ledger state.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/chain", get(handler::chain_handler))
        .route("/v1/pending", get(handler::pending_handler))
        .route("/v1/records", post(handler::add_record_handler))
        .route("/v1/seal", post(handler::seal_handler))
        .route("/v1/export", get(handler::export_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::{AddRecordResponse, ErrorResponse, SealResponse};
    use crate::config::ServerConfig;
    use crate::state::AppState;

    fn test_router() -> Router {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            export_dir: dir.keep(),
            ..ServerConfig::default()
        };
        build_router(AppState::from_config(&config).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router().oneshot(get_request("/v1/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn fresh_chain_is_genesis_only() {
        let response = test_router().oneshot(get_request("/v1/chain")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let chain: Vec<Value> = body_json(response).await;
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0]["index"], json!(1));
        assert_eq!(chain[0]["previous_hash"], json!("1"));
    }

    #[tokio::test]
    async fn add_seal_export_happy_path() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/v1/records",
                json!({"borrower": "Al", "lender": "Bo", "amount": 5.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let staged: AddRecordResponse = body_json(response).await;
        assert_eq!(staged.pending, 1);
        assert_eq!(staged.ledger, "Loans");

        let response = router
            .clone()
            .oneshot(post_json("/v1/seal", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let sealed: SealResponse = body_json(response).await;
        assert_eq!(sealed.index, 2);
        assert_eq!(sealed.records, 1);

        let response = router.oneshot(get_request("/v1/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Loans_blockchain.json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let blocks = chainscript_ledger::read_snapshot(&bytes).unwrap();
        assert_eq!(blocks.len(), 2);
        chainscript_ledger::verify_chain(&blocks).unwrap();
    }

    #[tokio::test]
    async fn bad_record_is_422_with_reasons() {
        let response = test_router()
            .oneshot(post_json(
                "/v1/records",
                json!({"borrower": "Al", "amount": "oops"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = body_json(response).await;
        assert!(error.errors[0].contains("expected float, got str"));
    }

    #[tokio::test]
    async fn sealing_an_empty_buffer_is_409() {
        let response = test_router()
            .oneshot(post_json("/v1/seal", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ErrorResponse = body_json(response).await;
        assert!(error.errors[0].contains("no pending records"));
    }

    #[tokio::test]
    async fn pending_reflects_staged_records() {
        let router = test_router();
        router
            .clone()
            .oneshot(post_json(
                "/v1/records",
                json!({"borrower": "Al", "lender": "Bo", "amount": 1.5}),
            ))
            .await
            .unwrap();

        let response = router.oneshot(get_request("/v1/pending")).await.unwrap();
        let pending: Vec<Value> = body_json(response).await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["borrower"], json!("Al"));
    }
}
