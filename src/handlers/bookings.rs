use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Booking;
use crate::services::bookings::{self, NewBooking};
use crate::state::AppState;

// GET /api/v1/bookings
#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub status: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let db = state.db.lock().unwrap();
    bookings::list(&db, query.status.as_deref()).map(Json)
}

// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let mut db = state.db.lock().unwrap();
    let booking = bookings::create(&mut db, body)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/v1/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    let db = state.db.lock().unwrap();
    bookings::get(&db, id).map(Json)
}

// PUT /api/v1/bookings/:id/check-in
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    let mut db = state.db.lock().unwrap();
    bookings::check_in(&mut db, id).map(Json)
}

// PUT /api/v1/bookings/:id/check-out
pub async fn check_out(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    let mut db = state.db.lock().unwrap();
    bookings::check_out(&mut db, id).map(Json)
}

// PUT /api/v1/bookings/:id/extend
#[derive(Deserialize)]
pub struct ExtendBookingRequest {
    pub new_check_out_date: NaiveDate,
}

pub async fn extend_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<ExtendBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let mut db = state.db.lock().unwrap();
    bookings::extend(&mut db, id, body.new_check_out_date).map(Json)
}

// DELETE /api/v1/bookings/:id — cancels rather than erases history
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let mut db = state.db.lock().unwrap();
    bookings::cancel(&mut db, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/bookings/checking-in-today
pub async fn checking_in_today(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let today = Utc::now().date_naive();
    let db = state.db.lock().unwrap();
    queries::bookings_checking_in_on(&db, &today).map(Json)
}

// GET /api/v1/bookings/checking-out-today
pub async fn checking_out_today(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let today = Utc::now().date_naive();
    let db = state.db.lock().unwrap();
    queries::bookings_checking_out_on(&db, &today).map(Json)
}
