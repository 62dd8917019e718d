//! Booking lifecycle: create, check-in, check-out, extend, cancel.
//!
//! Stays are half-open date ranges [check_in_date, check_out_date): the
//! check-out day is free for the next guest. Every mutation runs inside an
//! immediate transaction so the availability check and the writes it guards
//! commit together.

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, TransactionBehavior};
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, PaymentStatus, RoomStatus};

#[derive(Debug, Deserialize)]
pub struct NewBooking {
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i64,
    #[serde(default)]
    pub children: i64,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
}

pub fn create(conn: &mut Connection, new: NewBooking) -> Result<Booking, AppError> {
    if new.check_out_date <= new.check_in_date {
        return Err(AppError::InvalidRange(format!(
            "check-out {} must be after check-in {}",
            new.check_out_date, new.check_in_date
        )));
    }
    if new.adults < 1 {
        return Err(AppError::InvalidArgument(
            "at least one adult is required".to_string(),
        ));
    }
    if new.children < 0 {
        return Err(AppError::InvalidArgument(
            "children cannot be negative".to_string(),
        ));
    }
    let payment_status = match &new.payment_status {
        Some(s) => PaymentStatus::parse(s)?,
        None => PaymentStatus::Pending,
    };

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let room = queries::get_room(&tx, new.room_id)?
        .ok_or_else(|| AppError::NotFound(format!("room {}", new.room_id)))?;
    queries::get_guest(&tx, new.guest_id)?
        .ok_or_else(|| AppError::NotFound(format!("guest {}", new.guest_id)))?;

    // A confirmed booking does not occupy the room until check-in, so the
    // room's own status is not consulted here. Only date conflicts with
    // other active bookings block creation.
    let conflicts = queries::find_active_overlapping(
        &tx,
        room.id,
        &BookingStatus::ACTIVE,
        &new.check_in_date,
        &new.check_out_date,
        None,
    )?;
    if !conflicts.is_empty() {
        return Err(AppError::RoomNotAvailable(format!(
            "room {} is already booked between {} and {}",
            room.number, new.check_in_date, new.check_out_date
        )));
    }

    let nights = (new.check_out_date - new.check_in_date).num_days();
    let now = Utc::now().naive_utc();
    let mut booking = Booking {
        id: 0,
        room_id: room.id,
        guest_id: new.guest_id,
        check_in_date: new.check_in_date,
        check_out_date: new.check_out_date,
        adults: new.adults,
        children: new.children,
        total_amount: room.price_per_night * nights,
        status: BookingStatus::Confirmed,
        payment_status,
        notes: new.notes,
        created_at: now,
        updated_at: now,
    };
    booking.id = queries::insert_booking(&tx, &booking)?;
    tx.commit()?;

    tracing::info!(
        booking_id = booking.id,
        room = %room.number,
        nights,
        total = booking.total_amount,
        "booking created"
    );
    Ok(booking)
}

pub fn check_in(conn: &mut Connection, booking_id: i64) -> Result<Booking, AppError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut booking = queries::get_booking(&tx, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;
    if booking.status != BookingStatus::Confirmed {
        return Err(AppError::InvalidTransition(format!(
            "cannot check in a {} booking",
            booking.status.as_str()
        )));
    }

    booking.status = BookingStatus::CheckedIn;
    booking.updated_at = Utc::now().naive_utc();
    queries::update_booking(&tx, &booking)?;
    queries::update_room_status(&tx, booking.room_id, &RoomStatus::Occupied)?;
    tx.commit()?;

    tracing::info!(booking_id, room_id = booking.room_id, "guest checked in");
    Ok(booking)
}

pub fn check_out(conn: &mut Connection, booking_id: i64) -> Result<Booking, AppError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut booking = queries::get_booking(&tx, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;
    if booking.status != BookingStatus::CheckedIn {
        return Err(AppError::InvalidTransition(format!(
            "cannot check out a {} booking",
            booking.status.as_str()
        )));
    }

    booking.status = BookingStatus::CheckedOut;
    booking.updated_at = Utc::now().naive_utc();
    queries::update_booking(&tx, &booking)?;
    queries::update_room_status(&tx, booking.room_id, &RoomStatus::Available)?;
    tx.commit()?;

    tracing::info!(booking_id, room_id = booking.room_id, "guest checked out");
    Ok(booking)
}

pub fn extend(
    conn: &mut Connection,
    booking_id: i64,
    new_check_out: NaiveDate,
) -> Result<Booking, AppError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut booking = queries::get_booking(&tx, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;
    if !booking.status.is_active() {
        return Err(AppError::InvalidTransition(format!(
            "cannot extend a {} booking",
            booking.status.as_str()
        )));
    }
    if new_check_out <= booking.check_out_date {
        return Err(AppError::InvalidRange(format!(
            "new check-out {} must be after current check-out {}",
            new_check_out, booking.check_out_date
        )));
    }

    let room = queries::get_room(&tx, booking.room_id)?
        .ok_or_else(|| AppError::NotFound(format!("room {}", booking.room_id)))?;

    // The widened stay is checked as a whole, with this booking left out of
    // the search so it cannot conflict with itself.
    let conflicts = queries::find_active_overlapping(
        &tx,
        booking.room_id,
        &BookingStatus::ACTIVE,
        &booking.check_in_date,
        &new_check_out,
        Some(booking.id),
    )?;
    if !conflicts.is_empty() {
        return Err(AppError::RoomNotAvailable(format!(
            "room {} is already booked between {} and {}",
            room.number, booking.check_out_date, new_check_out
        )));
    }

    let additional_nights = (new_check_out - booking.check_out_date).num_days();
    booking.total_amount += room.price_per_night * additional_nights;
    booking.check_out_date = new_check_out;
    booking.updated_at = Utc::now().naive_utc();
    queries::update_booking(&tx, &booking)?;
    tx.commit()?;

    tracing::info!(
        booking_id,
        additional_nights,
        total = booking.total_amount,
        "booking extended"
    );
    Ok(booking)
}

pub fn cancel(conn: &mut Connection, booking_id: i64) -> Result<Booking, AppError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut booking = queries::get_booking(&tx, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))?;
    if !booking.status.is_active() {
        return Err(AppError::InvalidTransition(format!(
            "cannot cancel a {} booking",
            booking.status.as_str()
        )));
    }

    let was_checked_in = booking.status == BookingStatus::CheckedIn;
    booking.status = BookingStatus::Cancelled;
    booking.updated_at = Utc::now().naive_utc();
    queries::update_booking(&tx, &booking)?;

    // Only a booking that was occupying the room hands it back. Cancelling
    // a future booking must not free a room someone else is sleeping in.
    if was_checked_in {
        if let Some(room) = queries::get_room(&tx, booking.room_id)? {
            if room.status == RoomStatus::Occupied {
                queries::update_room_status(&tx, room.id, &RoomStatus::Available)?;
            }
        }
    }
    tx.commit()?;

    tracing::info!(booking_id, was_checked_in, "booking cancelled");
    Ok(booking)
}

pub fn get(conn: &Connection, booking_id: i64) -> Result<Booking, AppError> {
    queries::get_booking(conn, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))
}

pub fn list(conn: &Connection, status: Option<&str>) -> Result<Vec<Booking>, AppError> {
    let status = match status {
        Some(s) => Some(BookingStatus::parse(s)?),
        None => None,
    };
    queries::list_bookings(conn, status.as_ref())
}
