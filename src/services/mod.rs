pub mod bookings;
pub mod checklists;
pub mod inventory;
pub mod rooms;
