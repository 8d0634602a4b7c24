pub mod trains;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{cors, state::AppState};

pub const API_BASE_PATH: &str = "/api";

pub fn create_router(state: AppState) -> Router {
    let api = Router::new().nest(API_BASE_PATH, trains::router());

    cors::apply(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
