use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use ntt_infra::user_dashboard;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new().route("/:address/dashboard", get(get_dashboard))
}

pub async fn get_dashboard(
    Extension(state): Extension<Arc<AppState>>,
    Path(address): Path<String>,
) -> axum::response::Response {
    let user = match dto::parse_address(&address) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match user_dashboard(state.source.as_ref(), &user) {
        Ok(dashboard) => (StatusCode::OK, Json(dto::user_dashboard_to_json(&dashboard))).into_response(),
        Err(e) => errors::view_error_to_response(e),
    }
}
