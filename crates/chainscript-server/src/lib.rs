//! HTTP front end for one pre-configured chainscript ledger.
//!
//! The core's concurrency contract makes the host responsible for
//! serializing mutation; here every handler goes through one `RwLock` around
//! the execution context, so stage/seal sequences are serialized per
//! process. Endpoints:
//!
//! - `GET /v1/health` — liveness
//! - `GET /v1/chain` — the sealed chain
//! - `GET /v1/pending` — records staged but not yet sealed
//! - `POST /v1/records` — validate and stage a record (422 on rejection)
//! - `POST /v1/seal` — seal pending records (409 when nothing is pending)
//! - `GET /v1/export` — snapshot download, with a copy persisted on disk

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::ChainServer;
pub use state::{AppState, SharedState};
