use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::InventoryItem;

#[derive(Debug, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub current_level: Option<i64>,
    #[serde(default)]
    pub minimum_level: i64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub current_level: Option<i64>,
    pub minimum_level: Option<i64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

// 0 <= current_level <= quantity, and thresholds are never negative.
fn check_levels(item: &InventoryItem) -> Result<(), AppError> {
    if item.quantity < 0 {
        return Err(AppError::InvalidArgument(
            "quantity cannot be negative".to_string(),
        ));
    }
    if item.minimum_level < 0 {
        return Err(AppError::InvalidArgument(
            "minimum level cannot be negative".to_string(),
        ));
    }
    if item.current_level < 0 || item.current_level > item.quantity {
        return Err(AppError::InvalidArgument(format!(
            "current level {} must be between 0 and quantity {}",
            item.current_level, item.quantity
        )));
    }
    Ok(())
}

pub fn create(conn: &Connection, new: NewInventoryItem) -> Result<InventoryItem, AppError> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidArgument(
            "item name is required".to_string(),
        ));
    }

    let mut item = InventoryItem {
        id: 0,
        name: name.to_string(),
        category: new.category,
        quantity: new.quantity,
        current_level: new.current_level.unwrap_or(new.quantity),
        minimum_level: new.minimum_level,
        unit: new.unit.unwrap_or_else(|| "piece".to_string()),
        notes: new.notes,
        last_restocked: Utc::now().naive_utc(),
    };
    check_levels(&item)?;
    item.id = queries::insert_inventory_item(conn, &item)?;

    tracing::info!(item_id = item.id, name = %item.name, "inventory item created");
    Ok(item)
}

pub fn get(conn: &Connection, id: i64) -> Result<InventoryItem, AppError> {
    queries::get_inventory_item(conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("inventory item {id}")))
}

pub fn list(conn: &Connection, category: Option<&str>) -> Result<Vec<InventoryItem>, AppError> {
    queries::list_inventory(conn, category)
}

pub fn low_stock(conn: &Connection) -> Result<Vec<InventoryItem>, AppError> {
    queries::list_low_stock(conn)
}

pub fn update(
    conn: &Connection,
    id: i64,
    patch: InventoryItemPatch,
) -> Result<InventoryItem, AppError> {
    let mut item = get(conn, id)?;

    if let Some(name) = patch.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::InvalidArgument(
                "item name is required".to_string(),
            ));
        }
        item.name = name;
    }
    if let Some(category) = patch.category {
        item.category = category;
    }
    if let Some(quantity) = patch.quantity {
        item.quantity = quantity;
    }
    if let Some(level) = patch.current_level {
        item.current_level = level;
    }
    if let Some(minimum) = patch.minimum_level {
        item.minimum_level = minimum;
    }
    if let Some(unit) = patch.unit {
        item.unit = unit;
    }
    if patch.notes.is_some() {
        item.notes = patch.notes;
    }

    check_levels(&item)?;
    queries::update_inventory_item(conn, &item)?;
    Ok(item)
}

/// Resize the total stock. Shrinking it cannot leave more on hand than
/// exists, so the on-hand level is clamped down when needed.
pub fn set_quantity(conn: &Connection, id: i64, quantity: i64) -> Result<InventoryItem, AppError> {
    if quantity < 0 {
        return Err(AppError::InvalidArgument(
            "quantity cannot be negative".to_string(),
        ));
    }
    let mut item = get(conn, id)?;
    item.quantity = quantity;
    item.current_level = item.current_level.min(quantity);
    queries::update_inventory_item(conn, &item)?;
    Ok(item)
}

pub fn restock(conn: &Connection, id: i64) -> Result<InventoryItem, AppError> {
    let mut item = get(conn, id)?;
    item.current_level = item.quantity;
    item.last_restocked = Utc::now().naive_utc();
    queries::update_inventory_item(conn, &item)?;

    tracing::info!(item_id = id, level = item.current_level, "inventory restocked");
    Ok(item)
}

pub fn delete(conn: &Connection, id: i64) -> Result<(), AppError> {
    if !queries::delete_inventory_item(conn, id)? {
        return Err(AppError::NotFound(format!("inventory item {id}")));
    }
    Ok(())
}
