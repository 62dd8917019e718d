use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Room;
use crate::services::rooms::{self, NewRoom};
use crate::state::AppState;

// GET /api/v1/rooms
#[derive(Deserialize)]
pub struct ListRoomsQuery {
    pub status: Option<String>,
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<Room>>, AppError> {
    let db = state.db.lock().unwrap();
    rooms::list(&db, query.status.as_deref()).map(Json)
}

// POST /api/v1/rooms
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewRoom>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    let db = state.db.lock().unwrap();
    let room = rooms::create(&db, body)?;
    Ok((StatusCode::CREATED, Json(room)))
}

// GET /api/v1/rooms/available?check_in_date=&check_out_date=
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

pub async fn available_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Room>>, AppError> {
    let db = state.db.lock().unwrap();
    rooms::available(&db, &query.check_in_date, &query.check_out_date).map(Json)
}

// GET /api/v1/rooms/:id
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Room>, AppError> {
    let db = state.db.lock().unwrap();
    rooms::get(&db, id).map(Json)
}

// PUT /api/v1/rooms/:id/status?status=
#[derive(Deserialize)]
pub struct RoomStatusQuery {
    pub status: String,
}

pub async fn set_room_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<RoomStatusQuery>,
) -> Result<Json<Room>, AppError> {
    let db = state.db.lock().unwrap();
    rooms::set_status(&db, id, &query.status).map(Json)
}
