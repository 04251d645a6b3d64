use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};

use crate::models::booking::Booking;
use crate::models::room::{Room, RoomStatus};
use crate::models::room_type::RoomType;
use crate::services::inventory::interface::{InventoryStore, StoreError};

#[derive(Clone)]
pub struct MongoInventory {
    client: Arc<Client>,
}

impl MongoInventory {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub fn bookings(&self) -> Collection<Booking> {
        self.client.database("Bookings").collection("Bookings")
    }

    pub fn rooms(&self) -> Collection<Room> {
        self.client.database("Inventory").collection("Rooms")
    }

    pub fn room_types(&self) -> Collection<RoomType> {
        self.client.database("Inventory").collection("RoomTypes")
    }
}

impl InventoryStore for MongoInventory {
    async fn booking(&self, id: &ObjectId) -> Result<Booking, StoreError> {
        match self.bookings().find_one(doc! { "_id": *id }).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(StoreError::NotFound),
            Err(err) => {
                eprintln!("Error fetching booking {}: {:?}", id, err);
                Err(StoreError::Internal)
            }
        }
    }

    async fn update_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let id = booking.id.ok_or(StoreError::Internal)?;
        match self
            .bookings()
            .replace_one(doc! { "_id": id }, booking)
            .await
        {
            Ok(result) if result.matched_count == 0 => Err(StoreError::NotFound),
            Ok(_) => Ok(()),
            Err(err) => {
                eprintln!("Error updating booking {}: {:?}", id, err);
                Err(StoreError::Internal)
            }
        }
    }

    async fn room(&self, id: &ObjectId) -> Result<Room, StoreError> {
        match self.rooms().find_one(doc! { "_id": *id }).await {
            Ok(Some(room)) => Ok(room),
            Ok(None) => Err(StoreError::NotFound),
            Err(err) => {
                eprintln!("Error fetching room {}: {:?}", id, err);
                Err(StoreError::Internal)
            }
        }
    }

    async fn room_type(&self, id: &ObjectId) -> Result<RoomType, StoreError> {
        match self.room_types().find_one(doc! { "_id": *id }).await {
            Ok(Some(room_type)) => Ok(room_type),
            Ok(None) => Err(StoreError::NotFound),
            Err(err) => {
                eprintln!("Error fetching room type {}: {:?}", id, err);
                Err(StoreError::Internal)
            }
        }
    }

    async fn claim_room(
        &self,
        room_id: &ObjectId,
        booking_id: &ObjectId,
    ) -> Result<Room, StoreError> {
        // The status filter makes this a compare-and-swap: a concurrent claim
        // changes the status first and this update then matches nothing.
        let filter = doc! { "_id": *room_id, "status": "available" };
        let update = doc! {
            "$set": {
                "status": "occupied",
                "current_booking": *booking_id,
                "updated_at": DateTime::now(),
            }
        };

        match self
            .rooms()
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
        {
            Ok(Some(room)) => Ok(room),
            Ok(None) => Err(StoreError::Conflict),
            Err(err) => {
                eprintln!("Error claiming room {}: {:?}", room_id, err);
                Err(StoreError::Internal)
            }
        }
    }

    async fn release_room(
        &self,
        room_id: &ObjectId,
        to_status: RoomStatus,
    ) -> Result<(), StoreError> {
        let update = doc! {
            "$set": { "status": to_status.as_str(), "updated_at": DateTime::now() },
            "$unset": { "current_booking": "" },
        };

        match self.rooms().update_one(doc! { "_id": *room_id }, update).await {
            Ok(result) if result.matched_count == 0 => Err(StoreError::NotFound),
            Ok(_) => Ok(()),
            Err(err) => {
                eprintln!("Error releasing room {}: {:?}", room_id, err);
                Err(StoreError::Internal)
            }
        }
    }
}
