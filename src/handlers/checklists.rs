use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::models::ChecklistItem;
use crate::services::checklists::{self, ChecklistItemPatch, NewChecklistItem};
use crate::state::AppState;

// GET /api/v1/bookings/:id/checklist
pub async fn list_checklist(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<Json<Vec<ChecklistItem>>, AppError> {
    let db = state.db.lock().unwrap();
    checklists::list_for_booking(&db, booking_id).map(Json)
}

// POST /api/v1/bookings/:id/checklist
pub async fn add_checklist_item(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Json(body): Json<NewChecklistItem>,
) -> Result<(StatusCode, Json<ChecklistItem>), AppError> {
    let db = state.db.lock().unwrap();
    let item = checklists::add_item(&db, booking_id, body)?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/v1/bookings/:id/checklist
pub async fn replace_checklist(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Json(body): Json<Vec<NewChecklistItem>>,
) -> Result<Json<Vec<ChecklistItem>>, AppError> {
    let mut db = state.db.lock().unwrap();
    checklists::replace_for_booking(&mut db, booking_id, body).map(Json)
}

// PUT /api/v1/bookings/:id/checklist/:item_id
pub async fn update_checklist_item(
    State(state): State<Arc<AppState>>,
    Path((booking_id, item_id)): Path<(i64, String)>,
    Json(patch): Json<ChecklistItemPatch>,
) -> Result<Json<ChecklistItem>, AppError> {
    let db = state.db.lock().unwrap();
    checklists::update_item(&db, booking_id, &item_id, patch).map(Json)
}

// PUT /api/v1/bookings/:id/checklist/:item_id/toggle
pub async fn toggle_checklist_item(
    State(state): State<Arc<AppState>>,
    Path((booking_id, item_id)): Path<(i64, String)>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    checklists::toggle_item(&db, booking_id, &item_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/v1/bookings/:id/checklist/:item_id
pub async fn delete_checklist_item(
    State(state): State<Arc<AppState>>,
    Path((booking_id, item_id)): Path<(i64, String)>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    checklists::remove_item(&db, booking_id, &item_id)?;
    Ok(StatusCode::NO_CONTENT)
}
