use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Client;

use crate::models::room::RoomStatus;
use crate::models::room_type::RoomType;
use crate::models::upgrade::UpgradeInput;
use crate::services::inventory::{InventoryStore, MongoInventory, StoreError};
use crate::services::upgrade_service;

pub async fn list_upgrade_options(
    data: web::Data<Arc<Client>>,
    store: web::Data<MongoInventory>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let client = data.into_inner();

    let (booking_id,) = path.into_inner();
    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    let booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    let current = match store.room_type(&booking.room_type_id).await {
        Ok(room_type) => room_type,
        Err(StoreError::NotFound) => {
            return HttpResponse::NotFound().body("Room type not found")
        }
        Err(err) => {
            eprintln!("Error fetching room type: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room type");
        }
    };

    let types_collection: mongodb::Collection<RoomType> =
        client.database("Inventory").collection("RoomTypes");
    let all_types = match types_collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<RoomType>>().await {
            Ok(room_types) => room_types,
            Err(err) => {
                eprintln!("Error retrieving room types: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to retrieve room types");
            }
        },
        Err(err) => {
            eprintln!("Error fetching room types: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room types");
        }
    };

    let options = upgrade_service::list_upgrades(&current, &all_types, booking.nights());
    HttpResponse::Ok().json(options)
}

/// Apply a room-type upgrade. The booking's physical room binding (if any) is
/// released and cleared; staff re-allocate against the new type afterwards.
pub async fn apply_upgrade(
    store: web::Data<MongoInventory>,
    path: web::Path<(String,)>,
    input: web::Json<UpgradeInput>,
) -> impl Responder {
    let input = input.into_inner();

    let (booking_id,) = path.into_inner();
    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };
    let target_type_id = match ObjectId::parse_str(&input.room_type_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid room type ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid room type ID format");
        }
    };

    let mut booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    let current = match store.room_type(&booking.room_type_id).await {
        Ok(room_type) => room_type,
        Err(err) => {
            eprintln!("Error fetching current room type: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room type");
        }
    };
    let target = match store.room_type(&target_type_id).await {
        Ok(room_type) => room_type,
        Err(StoreError::NotFound) => {
            return HttpResponse::NotFound().body("Target room type not found")
        }
        Err(err) => {
            eprintln!("Error fetching target room type: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room type");
        }
    };

    let previous_room = booking.room_id;

    let fee = match upgrade_service::apply_upgrade(
        &mut booking,
        &current,
        &target,
        input.override_price,
    ) {
        Ok(fee) => fee,
        Err(err) => return HttpResponse::Conflict().body(err.to_string()),
    };

    // The upgraded stay needs a fresh allocation against the new type, so
    // the old physical room goes back into the pool.
    if let Some(room_id) = previous_room {
        if let Err(err) = store.release_room(&room_id, RoomStatus::Available).await {
            eprintln!("Error releasing room for booking {}: {:?}", booking_id, err);
            return HttpResponse::InternalServerError().body("Failed to release room");
        }
    }

    if let Some(reason) = input.reason {
        println!(
            "Upgrade applied to booking {} ({} -> {}): {}",
            booking_id,
            current.name,
            target.name,
            reason
        );
    }

    match store.update_booking(&booking).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "booking": booking,
            "applied_fee": fee,
        })),
        Err(err) => {
            eprintln!("Error updating booking {}: {:?}", booking_id, err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}
