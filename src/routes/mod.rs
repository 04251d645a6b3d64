pub mod allocation;
pub mod booking;
pub mod health;
pub mod payment;
pub mod room;
pub mod upgrade;
