//! HTTP layer - axum routes, handlers, extractors and DTOs.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /healthz`, `GET /api/v1/health` - Liveness check (no auth)
//!
//! ## Lists
//! - `GET /api/v1/lists` - Caller's lists, optional `?status=active|archived`
//! - `POST /api/v1/lists` - Create a list
//! - `GET|PATCH|DELETE /api/v1/lists/:list_id` - One list
//! - `POST /api/v1/lists/:list_id/archive` / `restore` - Status transitions
//! - `GET /api/v1/lists/:list_id/summary` - Budget summary
//!
//! ## Items
//! - `GET /api/v1/lists/:list_id/items` - Items, optional `?bought=&category=`
//! - `POST /api/v1/lists/:list_id/items` - Add an item
//! - `GET|PATCH|DELETE /api/v1/items/:item_id` - One item
//! - `POST /api/v1/items/:item_id/toggle-bought` - Flip the bought flag
//!
//! Everything under `/api/v1` except the health check requires
//! `Authorization: Bearer <token>`.

/// Bearer-token authentication extractor
pub mod auth;
/// Request and response bodies
pub mod dto;
/// Mapping of crate errors onto HTTP responses
pub mod error;
/// Request handlers
pub mod handlers;
/// Router assembly
pub mod routes;
/// Shared handler state
pub mod state;

pub use auth::CurrentUser;
pub use routes::{build_app, create_router};
pub use state::AppState;
