use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::errors::AppError;
use crate::models::{
    Booking, BookingStatus, ChecklistCategory, ChecklistItem, Expense, Guest, GuestBookingSummary,
    InventoryItem, PaymentStatus, Room, RoomStatus,
};

/// A stored value no current code could have written (bad date text,
/// unknown status). Reported as a conversion failure so it surfaces as a
/// storage error, not a caller mistake.
fn corrupt(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

fn date_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| corrupt(idx, format!("bad date {s}: {e}")))
}

fn opt_date_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(idx)? {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| corrupt(idx, format!("bad date {s}: {e}"))),
        None => Ok(None),
    }
}

fn datetime_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let s: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| corrupt(idx, format!("bad timestamp {s}: {e}")))
}

// ── Rooms ──

fn parse_room_row(row: &rusqlite::Row) -> rusqlite::Result<Room> {
    let status_str: String = row.get(4)?;
    let status = RoomStatus::parse(&status_str).map_err(|e| corrupt(4, e.to_string()))?;
    let amenities_json: String = row.get(7)?;
    let amenities: Vec<String> = serde_json::from_str(&amenities_json).unwrap_or_default();

    Ok(Room {
        id: row.get(0)?,
        number: row.get(1)?,
        room_type: row.get(2)?,
        price_per_night: row.get(3)?,
        status,
        capacity: row.get(5)?,
        description: row.get(6)?,
        amenities,
    })
}

pub fn insert_room(conn: &Connection, room: &Room) -> Result<i64, AppError> {
    let amenities = serde_json::to_string(&room.amenities).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO rooms (number, type, price_per_night, status, capacity, description, amenities)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            room.number,
            room.room_type,
            room.price_per_night,
            room.status.as_str(),
            room.capacity,
            room.description,
            amenities,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>, AppError> {
    let result = conn.query_row(
        "SELECT id, number, type, price_per_night, status, capacity, description, amenities
         FROM rooms WHERE id = ?1",
        params![id],
        parse_room_row,
    );

    match result {
        Ok(room) => Ok(Some(room)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>, AppError> {
    let result = conn.query_row(
        "SELECT id, number, type, price_per_night, status, capacity, description, amenities
         FROM rooms WHERE number = ?1",
        params![number],
        parse_room_row,
    );

    match result {
        Ok(room) => Ok(Some(room)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_rooms(conn: &Connection, status: Option<&RoomStatus>) -> Result<Vec<Room>, AppError> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status {
        Some(status) => (
            "SELECT id, number, type, price_per_night, status, capacity, description, amenities
             FROM rooms WHERE status = ?1 ORDER BY number ASC"
                .to_string(),
            vec![Box::new(status.as_str().to_string()) as Box<dyn rusqlite::types::ToSql>],
        ),
        None => (
            "SELECT id, number, type, price_per_night, status, capacity, description, amenities
             FROM rooms ORDER BY number ASC"
                .to_string(),
            vec![],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), parse_room_row)?;

    let mut rooms = vec![];
    for row in rows {
        rooms.push(row?);
    }
    Ok(rooms)
}

pub fn update_room_status(conn: &Connection, id: i64, status: &RoomStatus) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE rooms SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

/// Rooms marked available with no active booking overlapping the half-open
/// range [check_in, check_out).
pub fn find_available_rooms(
    conn: &Connection,
    check_in: &NaiveDate,
    check_out: &NaiveDate,
) -> Result<Vec<Room>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, number, type, price_per_night, status, capacity, description, amenities
         FROM rooms
         WHERE status = 'available'
           AND id NOT IN (
               SELECT room_id FROM bookings
               WHERE status IN ('confirmed', 'checked_in')
                 AND check_in_date < ?1 AND check_out_date > ?2
           )
         ORDER BY number ASC",
    )?;

    let rows = stmt.query_map(
        params![
            check_out.format("%Y-%m-%d").to_string(),
            check_in.format("%Y-%m-%d").to_string(),
        ],
        parse_room_row,
    )?;

    let mut rooms = vec![];
    for row in rows {
        rooms.push(row?);
    }
    Ok(rooms)
}

// ── Bookings ──

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let status_str: String = row.get(8)?;
    let status = BookingStatus::parse(&status_str).map_err(|e| corrupt(8, e.to_string()))?;
    let payment_str: String = row.get(9)?;
    let payment_status =
        PaymentStatus::parse(&payment_str).map_err(|e| corrupt(9, e.to_string()))?;

    Ok(Booking {
        id: row.get(0)?,
        room_id: row.get(1)?,
        guest_id: row.get(2)?,
        check_in_date: date_col(row, 3)?,
        check_out_date: date_col(row, 4)?,
        adults: row.get(5)?,
        children: row.get(6)?,
        total_amount: row.get(7)?,
        status,
        payment_status,
        notes: row.get(10)?,
        created_at: datetime_col(row, 11)?,
        updated_at: datetime_col(row, 12)?,
    })
}

pub fn insert_booking(conn: &Connection, booking: &Booking) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO bookings (room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            booking.room_id,
            booking.guest_id,
            booking.check_in_date.format("%Y-%m-%d").to_string(),
            booking.check_out_date.format("%Y-%m-%d").to_string(),
            booking.adults,
            booking.children,
            booking.total_amount,
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.notes,
            booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_booking(conn: &Connection, id: i64) -> Result<Option<Booking>, AppError> {
    let result = conn.query_row(
        "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes every field the lifecycle mutates. check_in_date, room and guest
/// are fixed at creation.
pub fn update_booking(conn: &Connection, booking: &Booking) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE bookings SET check_out_date = ?1, total_amount = ?2, status = ?3,
                 payment_status = ?4, notes = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            booking.check_out_date.format("%Y-%m-%d").to_string(),
            booking.total_amount,
            booking.status.as_str(),
            booking.payment_status.as_str(),
            booking.notes,
            booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            booking.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn list_bookings(
    conn: &Connection,
    status: Option<&BookingStatus>,
) -> Result<Vec<Booking>, AppError> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status {
        Some(status) => (
            "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
             FROM bookings WHERE status = ?1 ORDER BY check_in_date ASC, id ASC"
                .to_string(),
            vec![Box::new(status.as_str().to_string()) as Box<dyn rusqlite::types::ToSql>],
        ),
        None => (
            "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
             FROM bookings ORDER BY check_in_date ASC, id ASC"
                .to_string(),
            vec![],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

/// Bookings for `room_id` in any of `statuses` whose half-open stay
/// [check_in_date, check_out_date) intersects [check_in, check_out).
/// `exclude_id` leaves one booking out, for extension checks against itself.
pub fn find_active_overlapping(
    conn: &Connection,
    room_id: i64,
    statuses: &[BookingStatus],
    check_in: &NaiveDate,
    check_out: &NaiveDate,
    exclude_id: Option<i64>,
) -> Result<Vec<Booking>, AppError> {
    if statuses.is_empty() {
        return Ok(vec![]);
    }

    let mut sql = String::from(
        "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
         FROM bookings
         WHERE room_id = ?1 AND check_in_date < ?2 AND check_out_date > ?3",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![
        Box::new(room_id),
        Box::new(check_out.format("%Y-%m-%d").to_string()),
        Box::new(check_in.format("%Y-%m-%d").to_string()),
    ];

    let placeholders: Vec<String> = (0..statuses.len())
        .map(|i| format!("?{}", params_vec.len() + i + 1))
        .collect();
    sql.push_str(&format!(" AND status IN ({})", placeholders.join(", ")));
    for status in statuses {
        params_vec.push(Box::new(status.as_str().to_string()));
    }

    if let Some(id) = exclude_id {
        sql.push_str(&format!(" AND id != ?{}", params_vec.len() + 1));
        params_vec.push(Box::new(id));
    }
    sql.push_str(" ORDER BY check_in_date ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn bookings_checking_in_on(
    conn: &Connection,
    date: &NaiveDate,
) -> Result<Vec<Booking>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
         FROM bookings WHERE check_in_date = ?1 AND status = 'confirmed' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(
        params![date.format("%Y-%m-%d").to_string()],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn bookings_checking_out_on(
    conn: &Connection,
    date: &NaiveDate,
) -> Result<Vec<Booking>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, room_id, guest_id, check_in_date, check_out_date, adults, children, total_amount, status, payment_status, notes, created_at, updated_at
         FROM bookings WHERE check_out_date = ?1 AND status = 'checked_in' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(
        params![date.format("%Y-%m-%d").to_string()],
        parse_booking_row,
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

// ── Guests ──

fn parse_guest_row(row: &rusqlite::Row) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        middle_name: row.get(3)?,
        birth_date: opt_date_col(row, 4)?,
        identification_no: row.get(5)?,
        home_address: row.get(6)?,
        country: row.get(7)?,
        mobile_no: row.get(8)?,
        email_address: row.get(9)?,
        emergency_contact_name: row.get(10)?,
        emergency_contact_number: row.get(11)?,
    })
}

pub fn insert_guest(conn: &Connection, guest: &Guest) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO guests (first_name, last_name, middle_name, birth_date, identification_no, home_address, country, mobile_no, email_address, emergency_contact_name, emergency_contact_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            guest.first_name,
            guest.last_name,
            guest.middle_name,
            guest.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            guest.identification_no,
            guest.home_address,
            guest.country,
            guest.mobile_no,
            guest.email_address,
            guest.emergency_contact_name,
            guest.emergency_contact_number,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_guest(conn: &Connection, id: i64) -> Result<Option<Guest>, AppError> {
    let result = conn.query_row(
        "SELECT id, first_name, last_name, middle_name, birth_date, identification_no, home_address, country, mobile_no, email_address, emergency_contact_name, emergency_contact_number
         FROM guests WHERE id = ?1",
        params![id],
        parse_guest_row,
    );

    match result {
        Ok(guest) => Ok(Some(guest)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_guest_by_identification(
    conn: &Connection,
    identification_no: &str,
) -> Result<Option<Guest>, AppError> {
    let result = conn.query_row(
        "SELECT id, first_name, last_name, middle_name, birth_date, identification_no, home_address, country, mobile_no, email_address, emergency_contact_name, emergency_contact_number
         FROM guests WHERE identification_no = ?1",
        params![identification_no],
        parse_guest_row,
    );

    match result {
        Ok(guest) => Ok(Some(guest)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_guests(conn: &Connection) -> Result<Vec<Guest>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, middle_name, birth_date, identification_no, home_address, country, mobile_no, email_address, emergency_contact_name, emergency_contact_number
         FROM guests ORDER BY last_name ASC, first_name ASC",
    )?;
    let rows = stmt.query_map([], parse_guest_row)?;

    let mut guests = vec![];
    for row in rows {
        guests.push(row?);
    }
    Ok(guests)
}

pub fn update_guest(conn: &Connection, guest: &Guest) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE guests SET first_name = ?1, last_name = ?2, middle_name = ?3, birth_date = ?4,
                 identification_no = ?5, home_address = ?6, country = ?7, mobile_no = ?8,
                 email_address = ?9, emergency_contact_name = ?10, emergency_contact_number = ?11
         WHERE id = ?12",
        params![
            guest.first_name,
            guest.last_name,
            guest.middle_name,
            guest.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            guest.identification_no,
            guest.home_address,
            guest.country,
            guest.mobile_no,
            guest.email_address,
            guest.emergency_contact_name,
            guest.emergency_contact_number,
            guest.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_guest(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM guests WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

/// The guest's stay history, joined with the room number. Newest first.
pub fn bookings_for_guest(
    conn: &Connection,
    guest_id: i64,
) -> Result<Vec<GuestBookingSummary>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT b.id, r.number, b.check_in_date, b.check_out_date, b.status
         FROM bookings b JOIN rooms r ON r.id = b.room_id
         WHERE b.guest_id = ?1 ORDER BY b.check_in_date DESC, b.id DESC",
    )?;
    let rows = stmt.query_map(params![guest_id], |row| {
        let status_str: String = row.get(4)?;
        let status = BookingStatus::parse(&status_str).map_err(|e| corrupt(4, e.to_string()))?;
        Ok(GuestBookingSummary {
            id: row.get(0)?,
            room_number: row.get(1)?,
            check_in_date: date_col(row, 2)?,
            check_out_date: date_col(row, 3)?,
            status,
        })
    })?;

    let mut summaries = vec![];
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

pub fn guest_has_bookings(conn: &Connection, guest_id: i64) -> Result<bool, AppError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM bookings WHERE guest_id = ?1)",
        params![guest_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Checklist items ──

fn parse_checklist_row(row: &rusqlite::Row) -> rusqlite::Result<ChecklistItem> {
    let category_str: String = row.get(3)?;
    let category =
        ChecklistCategory::parse(&category_str).map_err(|e| corrupt(3, e.to_string()))?;

    Ok(ChecklistItem {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        item: row.get(2)?,
        category,
        completed: row.get::<_, i32>(4)? != 0,
        notes: row.get(5)?,
    })
}

pub fn insert_checklist_item(conn: &Connection, item: &ChecklistItem) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO checklist_items (id, booking_id, item, category, completed, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.id,
            item.booking_id,
            item.item,
            item.category.as_str(),
            item.completed as i32,
            item.notes,
        ],
    )?;
    Ok(())
}

pub fn get_checklist_item(conn: &Connection, id: &str) -> Result<Option<ChecklistItem>, AppError> {
    let result = conn.query_row(
        "SELECT id, booking_id, item, category, completed, notes
         FROM checklist_items WHERE id = ?1",
        params![id],
        parse_checklist_row,
    );

    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_checklist_for_booking(
    conn: &Connection,
    booking_id: i64,
) -> Result<Vec<ChecklistItem>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, item, category, completed, notes
         FROM checklist_items WHERE booking_id = ?1 ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![booking_id], parse_checklist_row)?;

    let mut items = vec![];
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

pub fn update_checklist_item(conn: &Connection, item: &ChecklistItem) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE checklist_items SET item = ?1, category = ?2, completed = ?3, notes = ?4
         WHERE id = ?5",
        params![
            item.item,
            item.category.as_str(),
            item.completed as i32,
            item.notes,
            item.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_checklist_item(conn: &Connection, id: &str) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM checklist_items WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn delete_checklist_for_booking(conn: &Connection, booking_id: i64) -> Result<usize, AppError> {
    let count = conn.execute(
        "DELETE FROM checklist_items WHERE booking_id = ?1",
        params![booking_id],
    )?;
    Ok(count)
}

// ── Inventory ──

fn parse_inventory_row(row: &rusqlite::Row) -> rusqlite::Result<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        quantity: row.get(3)?,
        current_level: row.get(4)?,
        minimum_level: row.get(5)?,
        unit: row.get(6)?,
        notes: row.get(7)?,
        last_restocked: datetime_col(row, 8)?,
    })
}

pub fn insert_inventory_item(conn: &Connection, item: &InventoryItem) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO inventory_items (name, category, quantity, current_level, minimum_level, unit, notes, last_restocked)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            item.name,
            item.category,
            item.quantity,
            item.current_level,
            item.minimum_level,
            item.unit,
            item.notes,
            item.last_restocked.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_inventory_item(conn: &Connection, id: i64) -> Result<Option<InventoryItem>, AppError> {
    let result = conn.query_row(
        "SELECT id, name, category, quantity, current_level, minimum_level, unit, notes, last_restocked
         FROM inventory_items WHERE id = ?1",
        params![id],
        parse_inventory_row,
    );

    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_inventory(
    conn: &Connection,
    category: Option<&str>,
) -> Result<Vec<InventoryItem>, AppError> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match category {
        Some(category) => (
            "SELECT id, name, category, quantity, current_level, minimum_level, unit, notes, last_restocked
             FROM inventory_items WHERE category = ?1 ORDER BY name ASC"
                .to_string(),
            vec![Box::new(category.to_string()) as Box<dyn rusqlite::types::ToSql>],
        ),
        None => (
            "SELECT id, name, category, quantity, current_level, minimum_level, unit, notes, last_restocked
             FROM inventory_items ORDER BY name ASC"
                .to_string(),
            vec![],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), parse_inventory_row)?;

    let mut items = vec![];
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

pub fn list_low_stock(conn: &Connection) -> Result<Vec<InventoryItem>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, quantity, current_level, minimum_level, unit, notes, last_restocked
         FROM inventory_items WHERE current_level <= minimum_level ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], parse_inventory_row)?;

    let mut items = vec![];
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

pub fn update_inventory_item(conn: &Connection, item: &InventoryItem) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE inventory_items SET name = ?1, category = ?2, quantity = ?3, current_level = ?4,
                 minimum_level = ?5, unit = ?6, notes = ?7, last_restocked = ?8
         WHERE id = ?9",
        params![
            item.name,
            item.category,
            item.quantity,
            item.current_level,
            item.minimum_level,
            item.unit,
            item.notes,
            item.last_restocked.format("%Y-%m-%d %H:%M:%S").to_string(),
            item.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_inventory_item(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM inventory_items WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

// ── Expenses ──

fn parse_expense_row(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        date_incurred: date_col(row, 3)?,
    })
}

pub fn insert_expense(conn: &Connection, expense: &Expense) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO expenses (description, amount, date_incurred) VALUES (?1, ?2, ?3)",
        params![
            expense.description,
            expense.amount,
            expense.date_incurred.format("%Y-%m-%d").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_expense(conn: &Connection, id: i64) -> Result<Option<Expense>, AppError> {
    let result = conn.query_row(
        "SELECT id, description, amount, date_incurred FROM expenses WHERE id = ?1",
        params![id],
        parse_expense_row,
    );

    match result {
        Ok(expense) => Ok(Some(expense)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_expenses(conn: &Connection) -> Result<Vec<Expense>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, description, amount, date_incurred
         FROM expenses ORDER BY date_incurred DESC, id DESC",
    )?;
    let rows = stmt.query_map([], parse_expense_row)?;

    let mut expenses = vec![];
    for row in rows {
        expenses.push(row?);
    }
    Ok(expenses)
}

pub fn update_expense(conn: &Connection, expense: &Expense) -> Result<bool, AppError> {
    let count = conn.execute(
        "UPDATE expenses SET description = ?1, amount = ?2, date_incurred = ?3 WHERE id = ?4",
        params![
            expense.description,
            expense.amount,
            expense.date_incurred.format("%Y-%m-%d").to_string(),
            expense.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<bool, AppError> {
    let count = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
    Ok(count > 0)
}
