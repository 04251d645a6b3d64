use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::models::room::{Room, RoomListQuery, RoomStatus, RoomStatusInput};
use crate::models::room_type::RoomType;

pub async fn get_room_types(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<RoomType> =
        client.database("Inventory").collection("RoomTypes");

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<RoomType>>().await {
            Ok(room_types) => HttpResponse::Ok().json(room_types),
            Err(err) => {
                eprintln!("Error retrieving room types: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve room types")
            }
        },
        Err(err) => {
            eprintln!("Error fetching room types: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch room types")
        }
    }
}

pub async fn get_rooms(
    data: web::Data<Arc<Client>>,
    query: web::Query<RoomListQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Room> = client.database("Inventory").collection("Rooms");

    let filter = match query.status {
        Some(status) => doc! { "status": status.as_str() },
        None => doc! {},
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Room>>().await {
            Ok(rooms) => HttpResponse::Ok().json(rooms),
            Err(err) => {
                eprintln!("Error retrieving rooms: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve rooms")
            }
        },
        Err(err) => {
            eprintln!("Error fetching rooms: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch rooms")
        }
    }
}

/// Housekeeping status change. Occupancy is owned by allocation and checkout:
/// a room cannot be moved into `occupied` here, and an occupied room cannot
/// be touched until its booking completes or cancels.
pub async fn update_room_status(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String,)>,
    input: web::Json<RoomStatusInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Room> = client.database("Inventory").collection("Rooms");

    let (room_id,) = path.into_inner();
    let room_object_id = match ObjectId::parse_str(&room_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid room ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid room ID format");
        }
    };

    if input.status == RoomStatus::Occupied {
        return HttpResponse::Conflict()
            .body("Rooms become occupied through allocation, not housekeeping");
    }

    let room = match collection.find_one(doc! { "_id": room_object_id }).await {
        Ok(Some(room)) => room,
        Ok(None) => return HttpResponse::NotFound().body("Room not found"),
        Err(err) => {
            eprintln!("Error fetching room: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room");
        }
    };

    if room.status == RoomStatus::Occupied {
        return HttpResponse::Conflict()
            .body("Room is occupied; complete or cancel its booking first");
    }

    let update = doc! {
        "$set": { "status": input.status.as_str(), "updated_at": DateTime::now() }
    };

    match collection
        .update_one(doc! { "_id": room_object_id }, update)
        .await
    {
        Ok(_) => HttpResponse::Ok().body("Room status updated"),
        Err(err) => {
            eprintln!("Error updating room status: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update room status")
        }
    }
}
