use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in_date: NaiveDate,
    /// Exclusive: the guest's last night is the one before this date.
    pub check_out_date: NaiveDate,
    pub adults: i64,
    pub children: i64,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold a claim on the room's dates.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Confirmed, BookingStatus::CheckedIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "checked_in" => Ok(BookingStatus::CheckedIn),
            "checked_out" => Ok(BookingStatus::CheckedOut),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown booking status: {s}"
            ))),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::CheckedIn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    PartiallyPaid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "partially_paid" => Ok(PaymentStatus::PartiallyPaid),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown payment status: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["confirmed", "checked_in", "checked_out", "cancelled"] {
            assert_eq!(BookingStatus::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            BookingStatus::parse("Checked_In").unwrap(),
            BookingStatus::CheckedIn
        );
        assert_eq!(
            BookingStatus::parse("CONFIRMED").unwrap(),
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn test_status_parse_unknown() {
        assert!(BookingStatus::parse("checkedin").is_err());
        assert!(BookingStatus::parse("pending").is_err());
        assert!(BookingStatus::parse("").is_err());
    }

    #[test]
    fn test_active_statuses() {
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::CheckedIn.is_active());
        assert!(!BookingStatus::CheckedOut.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn test_payment_status_parse() {
        assert_eq!(
            PaymentStatus::parse("Partially_Paid").unwrap(),
            PaymentStatus::PartiallyPaid
        );
        assert!(PaymentStatus::parse("overdue").is_err());
    }
}
