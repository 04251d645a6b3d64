use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use rand::{distributions::Alphanumeric, Rng};

use crate::models::booking::{
    Booking, BookingInput, BookingListQuery, BookingStatus, BookingStatusInput, PaymentStatus,
};
use crate::models::room::{Room, RoomStatus};
use crate::models::room_type::RoomType;
use crate::services::availability_service::{find_compatible_rooms, StayRequest};
use crate::services::inventory::{InventoryStore, MongoInventory, StoreError};
use crate::services::{allocation_service, booking_status, pricing_service::PricingService};

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

fn generate_reference() -> String {
    let code: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("BK-{}", code)
}

pub async fn create_booking(
    data: web::Data<Arc<Client>>,
    input: web::Json<BookingInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if input.guest_name.trim().is_empty() {
        return HttpResponse::BadRequest().body("Guest name is required");
    }
    if !is_valid_email(&input.guest_email) {
        return HttpResponse::BadRequest().body("Invalid guest email");
    }
    if input.guest_phone.trim().is_empty() {
        return HttpResponse::BadRequest().body("Guest phone is required");
    }
    if input.check_out_date <= input.check_in_date {
        return HttpResponse::BadRequest().body("Check-out must be after check-in");
    }
    if input.adults < 1 {
        return HttpResponse::BadRequest().body("At least one adult is required");
    }
    let room_count = input.room_count.unwrap_or(1);
    if room_count < 1 {
        return HttpResponse::BadRequest().body("At least one room is required");
    }

    let room_type_id = match ObjectId::parse_str(&input.room_type_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid room type ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid room type ID format");
        }
    };

    let room_types: mongodb::Collection<RoomType> =
        client.database("Inventory").collection("RoomTypes");
    let room_type = match room_types.find_one(doc! { "_id": room_type_id }).await {
        Ok(Some(room_type)) => room_type,
        Ok(None) => return HttpResponse::NotFound().body("Room type not found"),
        Err(err) => {
            eprintln!("Error fetching room type: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch room type");
        }
    };

    let add_on_names = input.add_ons.clone().unwrap_or_default();
    let add_ons = match PricingService::resolve_add_ons(&add_on_names) {
        Ok(add_ons) => add_ons,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };

    let nights = (input.check_out_date - input.check_in_date).num_days();
    let quote = match PricingService::quote(
        &room_type,
        nights,
        room_count,
        &add_ons,
        input.coupon_code.as_deref(),
    ) {
        Ok(quote) => quote,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };

    let time = DateTime::now();
    let mut booking = Booking {
        id: None,
        reference: generate_reference(),
        guest_name: input.guest_name,
        guest_email: input.guest_email,
        guest_phone: input.guest_phone,
        check_in_date: input.check_in_date,
        check_out_date: input.check_out_date,
        adults: input.adults,
        children: input.children.unwrap_or(0),
        room_count,
        room_type_id,
        room_id: None,
        add_ons,
        coupon_code: input.coupon_code,
        room_preferences: input.room_preferences.unwrap_or_default(),
        special_requests: input.special_requests,
        total_amount: quote.total,
        currency: "INR".to_string(),
        status: BookingStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_order_id: None,
        created_at: Some(time),
        updated_at: Some(time),
    };

    let collection: mongodb::Collection<Booking> =
        client.database("Bookings").collection("Bookings");

    match collection.insert_one(&booking).await {
        Ok(insert_result) => {
            booking.id = insert_result.inserted_id.as_object_id();
            HttpResponse::Created().json(serde_json::json!({
                "booking": booking,
                "pricing": quote,
            }))
        }
        Err(err) => {
            eprintln!("Error creating booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create booking")
        }
    }
}

pub async fn get_all_bookings(
    data: web::Data<Arc<Client>>,
    query: web::Query<BookingListQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database("Bookings").collection("Bookings");

    let filter = match query.status {
        Some(status) => doc! { "status": status.as_str() },
        None => doc! {},
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) => HttpResponse::Ok().json(bookings),
            Err(err) => {
                eprintln!("Error retrieving bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve bookings")
            }
        },
        Err(err) => {
            eprintln!("Error fetching bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch bookings")
        }
    }
}

pub async fn get_booking_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database("Bookings").collection("Bookings");

    let (booking_id,) = path.into_inner();
    let booking_object_id = match ObjectId::parse_str(&booking_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid booking ID format: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid booking ID format");
        }
    };

    match collection.find_one(doc! { "_id": booking_object_id }).await {
        Ok(Some(booking)) => HttpResponse::Ok().json(booking),
        Ok(None) => HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch booking")
        }
    }
}

/// Status / payment-status change, validated by the lifecycle tables. Moving
/// to `cancelled` releases any bound room back to `available`; checking out
/// to `completed` hands the room to housekeeping as `cleaning`.
pub async fn update_booking(
    store: web::Data<MongoInventory>,
    path: web::Path<(String,)>,
    input: web::Json<BookingStatusInput>,
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

    if input.status.is_none() && input.payment_status.is_none() {
        return HttpResponse::BadRequest()
            .body("At least one of status or payment_status must be provided");
    }

    let mut booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    if let Err(err) = booking_status::transition(&mut booking, input.status, input.payment_status) {
        return HttpResponse::Conflict().body(err.to_string());
    }

    // Required side effect of the transition, applied before the booking is
    // persisted so a storage failure never strands an occupied room.
    let release_to = match booking.status {
        BookingStatus::Cancelled => Some(RoomStatus::Available),
        BookingStatus::Completed => Some(RoomStatus::Cleaning),
        _ => None,
    };
    if let Some(to_status) = release_to {
        if let Err(err) =
            allocation_service::release_bound_room(store.get_ref(), &mut booking, to_status).await
        {
            eprintln!("Error releasing room for booking {}: {:?}", booking_id, err);
            return HttpResponse::InternalServerError().body("Failed to release room");
        }
    }

    match store.update_booking(&booking).await {
        Ok(()) => HttpResponse::Ok().json(booking),
        Err(err) => {
            eprintln!("Error updating booking {}: {:?}", booking_id, err);
            HttpResponse::InternalServerError().body("Failed to update booking")
        }
    }
}

/// Compatible rooms for an existing booking, plus alternatives of other room
/// types that would still fit the party if the requested type is sold out.
pub async fn check_availability(
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

    let rooms_collection: mongodb::Collection<Room> =
        client.database("Inventory").collection("Rooms");
    let rooms = match rooms_collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Room>>().await {
            Ok(rooms) => rooms,
            Err(err) => {
                eprintln!("Error retrieving rooms: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to retrieve rooms");
            }
        },
        Err(err) => {
            eprintln!("Error fetching rooms: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch rooms");
        }
    };

    let types_collection: mongodb::Collection<RoomType> =
        client.database("Inventory").collection("RoomTypes");
    let types_by_id: HashMap<ObjectId, RoomType> = match types_collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<RoomType>>().await {
            Ok(room_types) => room_types
                .into_iter()
                .filter_map(|t| t.id.map(|id| (id, t)))
                .collect(),
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

    let request = StayRequest::from_booking(&booking);
    let matches = find_compatible_rooms(&rooms, &types_by_id, &request);

    let mut unconstrained = request.clone();
    unconstrained.room_type_id = None;
    let alternatives: Vec<Room> = find_compatible_rooms(&rooms, &types_by_id, &unconstrained)
        .into_iter()
        .filter(|r| r.room_type_id != booking.room_type_id)
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "available": !matches.is_empty(),
        "rooms": matches,
        "alternatives": alternatives,
    }))
}
