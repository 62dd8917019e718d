use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One line of a booking's preparation checklist. Items are replaced as a
/// group when the front desk saves the whole list, so ids are UUIDs minted
/// by the server rather than rowids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub booking_id: i64,
    pub item: String,
    pub category: ChecklistCategory,
    pub completed: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    RoomInspection,
    Amenities,
    Cleaning,
    Maintenance,
    GuestServices,
}

impl ChecklistCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistCategory::RoomInspection => "room_inspection",
            ChecklistCategory::Amenities => "amenities",
            ChecklistCategory::Cleaning => "cleaning",
            ChecklistCategory::Maintenance => "maintenance",
            ChecklistCategory::GuestServices => "guest_services",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "room_inspection" => Ok(ChecklistCategory::RoomInspection),
            "amenities" => Ok(ChecklistCategory::Amenities),
            "cleaning" => Ok(ChecklistCategory::Cleaning),
            "maintenance" => Ok(ChecklistCategory::Maintenance),
            "guest_services" => Ok(ChecklistCategory::GuestServices),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown checklist category: {s}"
            ))),
        }
    }
}
