use mongodb::bson::oid::ObjectId;

use crate::models::booking::Booking;
use crate::models::room::{Room, RoomStatus};
use crate::models::room_type::RoomType;

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    Conflict,
    Internal,
}

/// Storage seam for the shared mutable records (bookings and rooms). Every
/// lifecycle mutation goes through this trait so the Mongo-backed store and
/// the in-memory one used in tests behave identically.
pub trait InventoryStore {
    async fn booking(&self, id: &ObjectId) -> Result<Booking, StoreError>;
    async fn update_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    async fn room(&self, id: &ObjectId) -> Result<Room, StoreError>;
    async fn room_type(&self, id: &ObjectId) -> Result<RoomType, StoreError>;

    /// Compare-and-swap claim: moves the room from `available` to `occupied`
    /// and binds the booking in one step. `Conflict` means somebody else got
    /// the room first.
    async fn claim_room(&self, room_id: &ObjectId, booking_id: &ObjectId)
        -> Result<Room, StoreError>;

    /// Clear the booking binding and park the room in `to_status`
    /// (`available` on cancellation, `cleaning` on checkout).
    async fn release_room(&self, room_id: &ObjectId, to_status: RoomStatus)
        -> Result<(), StoreError>;
}
