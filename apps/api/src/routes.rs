//! Router definition: one canonical route per operation.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::recipe;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    // Multipart bodies carry the image plus the form fields
    let body_limit = state.max_upload_bytes + 1024 * 1024;

    Router::new()
        .route(
            "/recipes",
            get(recipe::list_recipes).post(recipe::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(recipe::get_recipe)
                .put(recipe::update_recipe)
                .delete(recipe::delete_recipe),
        )
        .route("/health", get(recipe::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
