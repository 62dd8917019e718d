use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Housekeeping stock. `quantity` is the total the hotel owns,
/// `current_level` what is on hand right now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub current_level: i64,
    pub minimum_level: i64,
    pub unit: String,
    pub notes: Option<String>,
    pub last_restocked: NaiveDateTime,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.current_level <= self.minimum_level
    }
}
