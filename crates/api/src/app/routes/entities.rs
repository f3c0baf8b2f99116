use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use ntt_infra::{entity_history, entity_history_csv};

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/:address/history", get(get_history))
        .route("/:address/history.csv", get(download_history))
}

pub async fn get_history(
    Extension(state): Extension<Arc<AppState>>,
    Path(address): Path<String>,
) -> axum::response::Response {
    let entity = match dto::parse_address(&address) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match entity_history(state.source.as_ref(), &entity) {
        Ok(history) => (StatusCode::OK, Json(dto::entity_history_to_json(&history))).into_response(),
        Err(e) => errors::view_error_to_response(e),
    }
}

pub async fn download_history(
    Extension(state): Extension<Arc<AppState>>,
    Path(address): Path<String>,
) -> axum::response::Response {
    let entity = match dto::parse_address(&address) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match entity_history_csv(state.source.as_ref(), &entity, &state.csv) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, dto::csv_attachment(&entity)),
            ],
            csv,
        )
            .into_response(),
        Err(e) => errors::view_error_to_response(e),
    }
}
