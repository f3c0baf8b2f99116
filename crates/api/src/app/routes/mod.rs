use axum::Router;

pub mod admin;
pub mod entities;
pub mod system;
pub mod users;

/// Router for the dashboard endpoints.
///
/// Only `/admin` needs a caller; entity and user pages are public reads
/// keyed by address.
pub fn router() -> Router {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/entities", entities::router())
        .nest("/users", users::router())
}
