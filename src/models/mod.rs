pub mod booking;
pub mod pricing;
pub mod room;
pub mod room_type;
pub mod upgrade;
