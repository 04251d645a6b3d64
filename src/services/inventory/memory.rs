use std::collections::HashMap;
use std::sync::Mutex;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::models::booking::Booking;
use crate::models::room::{Room, RoomStatus};
use crate::models::room_type::RoomType;
use crate::services::inventory::interface::{InventoryStore, StoreError};

/// In-memory inventory with the same semantics as the Mongo store. Backs the
/// service and lifecycle tests; no MongoDB instance required.
#[derive(Default)]
pub struct MemoryInventory {
    bookings: Mutex<HashMap<ObjectId, Booking>>,
    rooms: Mutex<HashMap<ObjectId, Room>>,
    room_types: Mutex<HashMap<ObjectId, RoomType>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_booking(&self, mut booking: Booking) -> ObjectId {
        let id = booking.id.unwrap_or_else(ObjectId::new);
        booking.id = Some(id);
        self.bookings
            .lock()
            .expect("booking map poisoned")
            .insert(id, booking);
        id
    }

    pub fn insert_room(&self, mut room: Room) -> ObjectId {
        let id = room.id.unwrap_or_else(ObjectId::new);
        room.id = Some(id);
        self.rooms.lock().expect("room map poisoned").insert(id, room);
        id
    }

    pub fn insert_room_type(&self, mut room_type: RoomType) -> ObjectId {
        let id = room_type.id.unwrap_or_else(ObjectId::new);
        room_type.id = Some(id);
        self.room_types
            .lock()
            .expect("room type map poisoned")
            .insert(id, room_type);
        id
    }
}

impl InventoryStore for MemoryInventory {
    async fn booking(&self, id: &ObjectId) -> Result<Booking, StoreError> {
        self.bookings
            .lock()
            .map_err(|_| StoreError::Internal)?
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let id = booking.id.ok_or(StoreError::Internal)?;
        let mut bookings = self.bookings.lock().map_err(|_| StoreError::Internal)?;
        if !bookings.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        bookings.insert(id, booking.clone());
        Ok(())
    }

    async fn room(&self, id: &ObjectId) -> Result<Room, StoreError> {
        self.rooms
            .lock()
            .map_err(|_| StoreError::Internal)?
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn room_type(&self, id: &ObjectId) -> Result<RoomType, StoreError> {
        self.room_types
            .lock()
            .map_err(|_| StoreError::Internal)?
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn claim_room(
        &self,
        room_id: &ObjectId,
        booking_id: &ObjectId,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().map_err(|_| StoreError::Internal)?;
        let room = rooms.get_mut(room_id).ok_or(StoreError::NotFound)?;
        if room.status != RoomStatus::Available {
            return Err(StoreError::Conflict);
        }
        room.status = RoomStatus::Occupied;
        room.current_booking = Some(*booking_id);
        room.updated_at = Some(DateTime::now());
        Ok(room.clone())
    }

    async fn release_room(
        &self,
        room_id: &ObjectId,
        to_status: RoomStatus,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().map_err(|_| StoreError::Internal)?;
        let room = rooms.get_mut(room_id).ok_or(StoreError::NotFound)?;
        room.status = to_status;
        room.current_booking = None;
        room.updated_at = Some(DateTime::now());
        Ok(())
    }
}
