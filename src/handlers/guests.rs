use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Guest, GuestBookingSummary};
use crate::state::AppState;

// GET /api/v1/guests
pub async fn list_guests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Guest>>, AppError> {
    let db = state.db.lock().unwrap();
    queries::list_guests(&db).map(Json)
}

// POST /api/v1/guests
#[derive(Deserialize)]
pub struct NewGuestRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub identification_no: String,
    pub home_address: Option<String>,
    pub country: Option<String>,
    pub mobile_no: Option<String>,
    pub email_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_number: Option<String>,
}

pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), AppError> {
    let first_name = body.first_name.trim();
    let last_name = body.last_name.trim();
    let identification_no = body.identification_no.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::InvalidArgument(
            "first and last name are required".to_string(),
        ));
    }
    if identification_no.is_empty() {
        return Err(AppError::InvalidArgument(
            "identification number is required".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();
    if queries::get_guest_by_identification(&db, identification_no)?.is_some() {
        return Err(AppError::InvalidArgument(format!(
            "identification number {identification_no} is already registered"
        )));
    }

    let mut guest = Guest {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        middle_name: body.middle_name,
        birth_date: body.birth_date,
        identification_no: identification_no.to_string(),
        home_address: body.home_address,
        country: body.country,
        mobile_no: body.mobile_no,
        email_address: body.email_address,
        emergency_contact_name: body.emergency_contact_name,
        emergency_contact_number: body.emergency_contact_number,
    };
    guest.id = queries::insert_guest(&db, &guest)?;

    tracing::info!(guest_id = guest.id, "guest registered");
    Ok((StatusCode::CREATED, Json(guest)))
}

// GET /api/v1/guests/:id
pub async fn get_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Guest>, AppError> {
    let db = state.db.lock().unwrap();
    queries::get_guest(&db, id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("guest {id}")))
}

// GET /api/v1/guests/:id/bookings
pub async fn guest_bookings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<GuestBookingSummary>>, AppError> {
    let db = state.db.lock().unwrap();
    if queries::get_guest(&db, id)?.is_none() {
        return Err(AppError::NotFound(format!("guest {id}")));
    }
    queries::bookings_for_guest(&db, id).map(Json)
}

// PUT /api/v1/guests/:id
#[derive(Deserialize)]
pub struct GuestPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub identification_no: Option<String>,
    pub home_address: Option<String>,
    pub country: Option<String>,
    pub mobile_no: Option<String>,
    pub email_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_number: Option<String>,
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<GuestPatch>,
) -> Result<Json<Guest>, AppError> {
    let db = state.db.lock().unwrap();
    let mut guest = queries::get_guest(&db, id)?
        .ok_or_else(|| AppError::NotFound(format!("guest {id}")))?;

    if let Some(first_name) = patch.first_name {
        let first_name = first_name.trim().to_string();
        if first_name.is_empty() {
            return Err(AppError::InvalidArgument(
                "first name cannot be empty".to_string(),
            ));
        }
        guest.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        let last_name = last_name.trim().to_string();
        if last_name.is_empty() {
            return Err(AppError::InvalidArgument(
                "last name cannot be empty".to_string(),
            ));
        }
        guest.last_name = last_name;
    }
    if let Some(identification_no) = patch.identification_no {
        let identification_no = identification_no.trim().to_string();
        if identification_no.is_empty() {
            return Err(AppError::InvalidArgument(
                "identification number cannot be empty".to_string(),
            ));
        }
        if let Some(other) = queries::get_guest_by_identification(&db, &identification_no)? {
            if other.id != id {
                return Err(AppError::InvalidArgument(format!(
                    "identification number {identification_no} is already registered"
                )));
            }
        }
        guest.identification_no = identification_no;
    }
    if patch.middle_name.is_some() {
        guest.middle_name = patch.middle_name;
    }
    if patch.birth_date.is_some() {
        guest.birth_date = patch.birth_date;
    }
    if patch.home_address.is_some() {
        guest.home_address = patch.home_address;
    }
    if patch.country.is_some() {
        guest.country = patch.country;
    }
    if patch.mobile_no.is_some() {
        guest.mobile_no = patch.mobile_no;
    }
    if patch.email_address.is_some() {
        guest.email_address = patch.email_address;
    }
    if patch.emergency_contact_name.is_some() {
        guest.emergency_contact_name = patch.emergency_contact_name;
    }
    if patch.emergency_contact_number.is_some() {
        guest.emergency_contact_number = patch.emergency_contact_number;
    }

    queries::update_guest(&db, &guest)?;
    Ok(Json(guest))
}

// DELETE /api/v1/guests/:id
pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    if queries::get_guest(&db, id)?.is_none() {
        return Err(AppError::NotFound(format!("guest {id}")));
    }
    // Booking rows keep their guest reference for the books; such guests
    // cannot be removed.
    if queries::guest_has_bookings(&db, id)? {
        return Err(AppError::InvalidArgument(format!(
            "guest {id} has bookings and cannot be deleted"
        )));
    }
    queries::delete_guest(&db, id)?;
    Ok(StatusCode::NO_CONTENT)
}
