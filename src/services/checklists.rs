use rusqlite::{Connection, TransactionBehavior};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{ChecklistCategory, ChecklistItem};

#[derive(Debug, Deserialize)]
pub struct NewChecklistItem {
    pub item: String,
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChecklistItemPatch {
    pub item: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}

fn require_booking(conn: &Connection, booking_id: i64) -> Result<(), AppError> {
    queries::get_booking(conn, booking_id)?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))
}

fn build_item(booking_id: i64, new: NewChecklistItem) -> Result<ChecklistItem, AppError> {
    let text = new.item.trim();
    if text.is_empty() {
        return Err(AppError::InvalidArgument(
            "checklist item text is required".to_string(),
        ));
    }
    Ok(ChecklistItem {
        id: Uuid::new_v4().to_string(),
        booking_id,
        item: text.to_string(),
        category: ChecklistCategory::parse(&new.category)?,
        completed: new.completed,
        notes: new.notes,
    })
}

// Item ids are scoped to their booking in the API; an item reached through
// the wrong booking is treated as absent.
fn get_owned_item(
    conn: &Connection,
    booking_id: i64,
    item_id: &str,
) -> Result<ChecklistItem, AppError> {
    let item = queries::get_checklist_item(conn, item_id)?
        .ok_or_else(|| AppError::NotFound(format!("checklist item {item_id}")))?;
    if item.booking_id != booking_id {
        return Err(AppError::NotFound(format!("checklist item {item_id}")));
    }
    Ok(item)
}

pub fn list_for_booking(
    conn: &Connection,
    booking_id: i64,
) -> Result<Vec<ChecklistItem>, AppError> {
    require_booking(conn, booking_id)?;
    queries::list_checklist_for_booking(conn, booking_id)
}

pub fn add_item(
    conn: &Connection,
    booking_id: i64,
    new: NewChecklistItem,
) -> Result<ChecklistItem, AppError> {
    require_booking(conn, booking_id)?;
    let item = build_item(booking_id, new)?;
    queries::insert_checklist_item(conn, &item)?;
    Ok(item)
}

/// Swap the whole list in one transaction. Any invalid entry rolls the
/// replacement back and leaves the previous list in place.
pub fn replace_for_booking(
    conn: &mut Connection,
    booking_id: i64,
    items: Vec<NewChecklistItem>,
) -> Result<Vec<ChecklistItem>, AppError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    require_booking(&tx, booking_id)?;
    queries::delete_checklist_for_booking(&tx, booking_id)?;

    let mut saved = Vec::with_capacity(items.len());
    for new in items {
        let item = build_item(booking_id, new)?;
        queries::insert_checklist_item(&tx, &item)?;
        saved.push(item);
    }
    tx.commit()?;

    tracing::info!(booking_id, count = saved.len(), "checklist replaced");
    Ok(saved)
}

pub fn update_item(
    conn: &Connection,
    booking_id: i64,
    item_id: &str,
    patch: ChecklistItemPatch,
) -> Result<ChecklistItem, AppError> {
    let mut item = get_owned_item(conn, booking_id, item_id)?;

    if let Some(text) = patch.item {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AppError::InvalidArgument(
                "checklist item text is required".to_string(),
            ));
        }
        item.item = text;
    }
    if let Some(category) = &patch.category {
        item.category = ChecklistCategory::parse(category)?;
    }
    if let Some(completed) = patch.completed {
        item.completed = completed;
    }
    if patch.notes.is_some() {
        item.notes = patch.notes;
    }

    queries::update_checklist_item(conn, &item)?;
    Ok(item)
}

pub fn toggle_item(
    conn: &Connection,
    booking_id: i64,
    item_id: &str,
) -> Result<ChecklistItem, AppError> {
    let mut item = get_owned_item(conn, booking_id, item_id)?;
    item.completed = !item.completed;
    queries::update_checklist_item(conn, &item)?;
    Ok(item)
}

pub fn remove_item(conn: &Connection, booking_id: i64, item_id: &str) -> Result<(), AppError> {
    get_owned_item(conn, booking_id, item_id)?;
    queries::delete_checklist_item(conn, item_id)?;
    Ok(())
}
