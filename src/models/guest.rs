use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::BookingStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
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

/// One line of a guest's stay history, denormalized with the room number
/// by the store layer so callers never chase a room reference themselves.
#[derive(Debug, Clone, Serialize)]
pub struct GuestBookingSummary {
    pub id: i64,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
}
