//! API Handlers
//!
//! Each handler authenticates through [`CurrentUser`], converts the request DTO
//! into a core input, calls the core function with the caller's id, and maps the
//! model back into a response DTO.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::auth::CurrentUser;
use crate::api::dto::{
    CreateItemRequest, CreateListRequest, HealthResponse, ItemQuery, ItemResponse, ListQuery,
    ListResponse, UpdateItemRequest, UpdateListRequest,
};
use crate::api::state::AppState;
use crate::core::{
    item,
    list::{self, NewList},
    summary::{self, BudgetSummary},
};
use crate::errors::Result;

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.db.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Database ping failed: {e}");
            "unhealthy"
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

// ============================================
// Lists
// ============================================

/// List the caller's shopping lists
pub async fn list_lists(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ListResponse>>> {
    let lists = list::list_lists(&state.db, user.id, query.status).await?;
    let body = lists
        .into_iter()
        .map(ListResponse::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(body))
}

/// Create a shopping list owned by the caller
pub async fn create_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ListResponse>)> {
    let new = NewList {
        name: request.name,
        currency: request
            .currency
            .unwrap_or_else(|| state.config.default_currency.clone()),
        budget: request.budget_amount,
    };

    let created = list::create_list(&state.db, user.id, new).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::try_from(created)?)))
}

/// Get one list
pub async fn get_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<Json<ListResponse>> {
    let found = list::get_owned_list(&state.db, user.id, list_id).await?;
    Ok(Json(ListResponse::try_from(found)?))
}

/// Partially update a list
pub async fn update_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
    Json(request): Json<UpdateListRequest>,
) -> Result<Json<ListResponse>> {
    let updated = list::update_list(&state.db, user.id, list_id, request.into()).await?;
    Ok(Json(ListResponse::try_from(updated)?))
}

/// Archive a list
pub async fn archive_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<Json<ListResponse>> {
    let archived = list::archive_list(&state.db, user.id, list_id).await?;
    Ok(Json(ListResponse::try_from(archived)?))
}

/// Restore an archived list
pub async fn restore_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<Json<ListResponse>> {
    let restored = list::restore_list(&state.db, user.id, list_id).await?;
    Ok(Json(ListResponse::try_from(restored)?))
}

/// Delete a list and its items
pub async fn delete_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<StatusCode> {
    list::delete_list(&state.db, user.id, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Budget summary for a list
pub async fn get_summary(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
) -> Result<Json<BudgetSummary>> {
    let report = summary::get_list_summary(&state.db, user.id, list_id).await?;
    Ok(Json(report))
}

// ============================================
// Items
// ============================================

/// Items of one list
pub async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<ItemResponse>>> {
    let items = item::list_items(&state.db, user.id, list_id, query.into()).await?;
    let body = items
        .into_iter()
        .map(ItemResponse::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(body))
}

/// Add an item to a list
pub async fn create_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(list_id): Path<i64>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let created = item::create_item(&state.db, user.id, list_id, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::try_from(created)?)))
}

/// Get one item
pub async fn get_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<i64>,
) -> Result<Json<ItemResponse>> {
    let found = item::get_item(&state.db, user.id, item_id).await?;
    Ok(Json(ItemResponse::try_from(found)?))
}

/// Partially update an item
pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>> {
    let updated = item::update_item(&state.db, user.id, item_id, request.into()).await?;
    Ok(Json(ItemResponse::try_from(updated)?))
}

/// Flip an item's bought flag
pub async fn toggle_bought(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<i64>,
) -> Result<Json<ItemResponse>> {
    let toggled = item::toggle_bought(&state.db, user.id, item_id).await?;
    Ok(Json(ItemResponse::try_from(toggled)?))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<i64>,
) -> Result<StatusCode> {
    item::delete_item(&state.db, user.id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
