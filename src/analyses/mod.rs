mod dto;
pub mod handlers;
pub mod repo;
mod services;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/user/:user_id/analyses", get(handlers::list_user_analyses))
        .merge(handlers::analyze_routes())
}
