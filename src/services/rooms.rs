use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Room, RoomStatus};

#[derive(Debug, Deserialize)]
pub struct NewRoom {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: i64,
    pub status: Option<String>,
    pub capacity: Option<i64>,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

pub fn create(conn: &Connection, new: NewRoom) -> Result<Room, AppError> {
    let number = new.number.trim();
    if number.is_empty() {
        return Err(AppError::InvalidArgument(
            "room number is required".to_string(),
        ));
    }
    if new.price_per_night <= 0 {
        return Err(AppError::InvalidArgument(
            "price per night must be positive".to_string(),
        ));
    }
    let status = match &new.status {
        Some(s) => RoomStatus::parse(s)?,
        None => RoomStatus::Available,
    };
    if queries::get_room_by_number(conn, number)?.is_some() {
        return Err(AppError::InvalidArgument(format!(
            "room number {number} already exists"
        )));
    }

    let mut room = Room {
        id: 0,
        number: number.to_string(),
        room_type: new.room_type,
        price_per_night: new.price_per_night,
        status,
        capacity: new.capacity,
        description: new.description,
        amenities: new.amenities,
    };
    room.id = queries::insert_room(conn, &room)?;

    tracing::info!(room_id = room.id, number = %room.number, "room created");
    Ok(room)
}

pub fn get(conn: &Connection, id: i64) -> Result<Room, AppError> {
    queries::get_room(conn, id)?.ok_or_else(|| AppError::NotFound(format!("room {id}")))
}

pub fn list(conn: &Connection, status: Option<&str>) -> Result<Vec<Room>, AppError> {
    let status = match status {
        Some(s) => Some(RoomStatus::parse(s)?),
        None => None,
    };
    queries::list_rooms(conn, status.as_ref())
}

/// Operator override, e.g. taking a room out of service. The booking
/// lifecycle flips occupancy on its own; this is for everything else.
pub fn set_status(conn: &Connection, id: i64, status: &str) -> Result<Room, AppError> {
    let status = RoomStatus::parse(status)?;
    let mut room = queries::get_room(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("room {id}")))?;
    queries::update_room_status(conn, id, &status)?;
    room.status = status;

    tracing::info!(room_id = id, status = room.status.as_str(), "room status set");
    Ok(room)
}

pub fn available(
    conn: &Connection,
    check_in: &NaiveDate,
    check_out: &NaiveDate,
) -> Result<Vec<Room>, AppError> {
    if check_out <= check_in {
        return Err(AppError::InvalidRange(format!(
            "check-out {check_out} must be after check-in {check_in}"
        )));
    }
    queries::find_available_rooms(conn, check_in, check_out)
}
