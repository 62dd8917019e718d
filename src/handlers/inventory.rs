use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::InventoryItem;
use crate::services::inventory::{self, InventoryItemPatch, NewInventoryItem};
use crate::state::AppState;

// GET /api/v1/inventory
#[derive(Deserialize)]
pub struct ListInventoryQuery {
    pub category: Option<String>,
}

pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListInventoryQuery>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::list(&db, query.category.as_deref()).map(Json)
}

// POST /api/v1/inventory
pub async fn create_inventory_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), AppError> {
    let db = state.db.lock().unwrap();
    let item = inventory::create(&db, body)?;
    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/v1/inventory/low-stock
pub async fn low_stock(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::low_stock(&db).map(Json)
}

// GET /api/v1/inventory/:id
pub async fn get_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<InventoryItem>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::get(&db, id).map(Json)
}

// PUT /api/v1/inventory/:id
pub async fn update_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<InventoryItemPatch>,
) -> Result<Json<InventoryItem>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::update(&db, id, patch).map(Json)
}

// PATCH /api/v1/inventory/:id/quantity
#[derive(Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

pub async fn set_quantity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<QuantityRequest>,
) -> Result<Json<InventoryItem>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::set_quantity(&db, id, body.quantity).map(Json)
}

// POST /api/v1/inventory/:id/restock
pub async fn restock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<InventoryItem>, AppError> {
    let db = state.db.lock().unwrap();
    inventory::restock(&db, id).map(Json)
}

// DELETE /api/v1/inventory/:id
pub async fn delete_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    inventory::delete(&db, id)?;
    Ok(StatusCode::NO_CONTENT)
}
