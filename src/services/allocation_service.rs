use std::fmt;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::models::booking::{Booking, BookingStatus};
use crate::models::room::{Room, RoomStatus};
use crate::services::inventory::{InventoryStore, StoreError};

#[derive(Debug, PartialEq, Eq)]
pub enum AllocationError {
    BookingNotAllocatable(String),
    RoomNotCompatible(String),
    Store(StoreError),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::BookingNotAllocatable(msg) => {
                write!(f, "booking not allocatable: {}", msg)
            }
            AllocationError::RoomNotCompatible(msg) => write!(f, "room not compatible: {}", msg),
            AllocationError::Store(_) => write!(f, "inventory store error"),
        }
    }
}

impl From<StoreError> for AllocationError {
    fn from(err: StoreError) -> Self {
        AllocationError::Store(err)
    }
}

/// Bind a confirmed, unallocated booking to a physical room. Preconditions
/// are re-checked against current store state, not the state the staff member
/// saw when picking the room, and the claim itself is a compare-and-swap so a
/// concurrent allocation of the same room loses cleanly.
pub async fn allocate<S: InventoryStore>(
    store: &S,
    booking_id: &ObjectId,
    room_id: &ObjectId,
) -> Result<(Booking, Room), AllocationError> {
    let mut booking = store.booking(booking_id).await?;

    if booking.status != BookingStatus::Confirmed {
        return Err(AllocationError::BookingNotAllocatable(format!(
            "booking must be confirmed, currently {}",
            booking.status.as_str()
        )));
    }
    if booking.room_id.is_some() {
        return Err(AllocationError::BookingNotAllocatable(
            "booking already has a room allocated".to_string(),
        ));
    }

    let room = store.room(room_id).await?;
    let room_type = store.room_type(&room.room_type_id).await?;

    if room.status != RoomStatus::Available {
        return Err(AllocationError::RoomNotCompatible(format!(
            "room {} is {}",
            room.number,
            room.status.as_str()
        )));
    }
    if room.room_type_id != booking.room_type_id {
        return Err(AllocationError::RoomNotCompatible(format!(
            "room {} is not of the requested room type",
            room.number
        )));
    }
    if room_type.max_occupancy < booking.party_size() {
        return Err(AllocationError::RoomNotCompatible(format!(
            "room {} sleeps {}, party of {}",
            room.number,
            room_type.max_occupancy,
            booking.party_size()
        )));
    }

    let claimed = match store.claim_room(room_id, booking_id).await {
        Ok(room) => room,
        Err(StoreError::Conflict) => {
            return Err(AllocationError::RoomNotCompatible(format!(
                "room {} was just taken by another booking",
                room.number
            )))
        }
        Err(err) => return Err(err.into()),
    };

    booking.room_id = Some(*room_id);
    booking.updated_at = Some(DateTime::now());

    if let Err(err) = store.update_booking(&booking).await {
        // Compensate: the room was claimed but the booking side failed, so
        // put the room back rather than leave the pair half-bound.
        eprintln!(
            "Allocation of room {} to booking {} failed after claim, releasing room: {:?}",
            room_id, booking_id, err
        );
        let _ = store.release_room(room_id, RoomStatus::Available).await;
        return Err(err.into());
    }

    Ok((booking, claimed))
}

/// Release the room bound to a booking, if any, and clear the binding on the
/// booking side. Used when a booking is cancelled (room back to `available`)
/// or checked out (room to `cleaning`).
pub async fn release_bound_room<S: InventoryStore>(
    store: &S,
    booking: &mut Booking,
    to_status: RoomStatus,
) -> Result<(), StoreError> {
    match booking.room_id {
        Some(room_id) => {
            store.release_room(&room_id, to_status).await?;
            booking.room_id = None;
            Ok(())
        }
        None => Ok(()),
    }
}
