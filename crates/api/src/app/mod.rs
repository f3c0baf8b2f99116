//! HTTP API application wiring (Axum router + shared state).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per dashboard)
//! - `dto.rs`: JSON mapping of the views, amounts rendered with 18 decimals
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use ntt_infra::LedgerSource;
use ntt_ledger::CsvOptions;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// What every handler gets: the ledger and the export settings.
pub struct AppState {
    pub source: Arc<dyn LedgerSource>,
    pub csv: CsvOptions,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(source: Arc<dyn LedgerSource>, csv: CsvOptions) -> Router {
    let state = Arc::new(AppState { source, csv });

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_id_middleware)))
}
