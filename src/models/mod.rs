pub mod booking;
pub mod checklist;
pub mod expense;
pub mod guest;
pub mod inventory;
pub mod room;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use checklist::{ChecklistCategory, ChecklistItem};
pub use expense::Expense;
pub use guest::{Guest, GuestBookingSummary};
pub use inventory::InventoryItem;
pub use room::{Room, RoomStatus};
