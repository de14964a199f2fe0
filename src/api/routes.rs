//! API Routes
//!
//! Route definitions for the Shop API.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    archive_list, create_item, create_list, delete_item, delete_list, get_item, get_list,
    get_summary, health_check, list_items, list_lists, restore_list, toggle_bought, update_item,
    update_list,
};
use crate::api::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Lists
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/:list_id",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .route("/lists/:list_id/archive", post(archive_list))
        .route("/lists/:list_id/restore", post(restore_list))
        .route("/lists/:list_id/summary", get(get_summary))
        // Items
        .route("/lists/:list_id/items", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/items/:item_id/toggle-bought", post(toggle_bought))
        .with_state(state)
}

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    let enable_cors = state.config.enable_cors;

    let root_router = Router::new().route("/", get(|| async { "Shop API" }));

    let health_router = Router::new()
        .route("/healthz", get(health_check))
        .with_state(state.clone());

    let mut router = root_router
        .merge(health_router)
        .nest("/api/v1", create_router(state));

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}
