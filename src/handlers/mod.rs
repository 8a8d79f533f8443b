pub mod health;
pub mod page;
pub mod upload;

pub use health::*;
pub use page::*;
pub use upload::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Builds the application router. `body_limit_bytes` caps request bodies;
/// `None` disables axum's default cap.
pub fn create_router(state: AppState, body_limit_bytes: Option<usize>) -> Router {
    let body_limit = match body_limit_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(page_handler))
        .route("/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(body_limit)
                .layer(axum::middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}
