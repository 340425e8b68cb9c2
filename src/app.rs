use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/districts", get(handlers::get_districts))
        .route("/api/series", get(handlers::get_series))
        .with_state(state)
}
