pub mod bookings;
pub mod checklists;
pub mod expenses;
pub mod guests;
pub mod health;
pub mod inventory;
pub mod rooms;
