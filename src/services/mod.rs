pub mod allocation_service;
pub mod availability_service;
pub mod booking_status;
pub mod inventory;
pub mod pricing_service;
pub mod upgrade_service;
