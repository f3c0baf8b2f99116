use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use ntt_infra::admin_dashboard;

use crate::app::{dto, errors, AppState};
use crate::context::CallerContext;
use crate::middleware;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .layer(axum::middleware::from_fn(middleware::caller_middleware))
}

pub async fn get_dashboard(
    Extension(state): Extension<Arc<AppState>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    match admin_dashboard(state.source.as_ref(), &caller.account()) {
        Ok(dashboard) => (StatusCode::OK, Json(dto::admin_dashboard_to_json(&dashboard))).into_response(),
        Err(e) => errors::view_error_to_response(e),
    }
}
