use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ntt_infra::ViewError;

pub fn view_error_to_response(err: ViewError) -> axum::response::Response {
    match err {
        ViewError::AccessDenied(e) => json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()),
        ViewError::NotAnEntity(account) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{account} is not a registered entity"),
        ),
        ViewError::Source(e) => {
            tracing::error!(error = %e, "ledger source failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "source_error", e.to_string())
        }
        ViewError::Format(e) => {
            tracing::error!(error = %e, "export failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "format_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
