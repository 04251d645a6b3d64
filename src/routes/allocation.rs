use actix_web::{web, HttpResponse, Responder};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::services::allocation_service::{allocate, AllocationError};
use crate::services::inventory::{MongoInventory, StoreError};

#[derive(Debug, Deserialize, Serialize)]
pub struct AllocateInput {
    pub room_id: String,
}

pub async fn allocate_room(
    store: web::Data<MongoInventory>,
    path: web::Path<(String,)>,
    input: web::Json<AllocateInput>,
) -> impl Responder {

    let (booking_id,) = path.into_inner();
    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };
    let room_object_id = match ObjectId::parse_str(&input.room_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid room ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid room ID format");
        }
    };

    match allocate(store.get_ref(), &booking_object_id, &room_object_id).await {
        Ok((booking, room)) => HttpResponse::Ok().json(serde_json::json!({
            "booking": booking,
            "room": room,
        })),
        Err(AllocationError::BookingNotAllocatable(msg)) => {
            HttpResponse::Conflict().json(serde_json::json!({
                "error": "booking_not_allocatable",
                "message": msg,
            }))
        }
        Err(AllocationError::RoomNotCompatible(msg)) => {
            HttpResponse::Conflict().json(serde_json::json!({
                "error": "room_not_compatible",
                "message": msg,
            }))
        }
        Err(AllocationError::Store(StoreError::NotFound)) => {
            HttpResponse::NotFound().body("Booking or room not found")
        }
        Err(AllocationError::Store(err)) => {
            eprintln!("Error allocating room: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to allocate room")
        }
    }
}
