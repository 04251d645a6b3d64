use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use stripe::{
    CapturePaymentIntent, CreatePaymentIntent, CreateRefund, Currency, PaymentIntent,
    PaymentIntentCaptureMethod, PaymentIntentId, PaymentIntentStatus, Refund,
};

use crate::models::booking::{BookingStatus, PaymentStatus};
use crate::services::booking_status;
use crate::services::inventory::{InventoryStore, MongoInventory, StoreError};
use crate::services::pricing_service::round_money;

/// Financial calls must not hang; an elapsed timeout is treated as an
/// ambiguous gateway response and the booking is left untouched.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateOrderInput {
    pub booking_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct VerifyPaymentInput {
    pub booking_id: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RefundInput {
    pub booking_id: String,
    pub amount: Option<f64>,
    pub reason: Option<String>,
}

fn parse_booking_id(raw: &str) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(raw).map_err(|e| {
        eprintln!("Invalid booking ID format: {:?}", e);
        HttpResponse::BadRequest().body("Invalid booking ID format")
    })
}

pub async fn create_order(
    store: web::Data<MongoInventory>,
    stripe_data: web::Data<Arc<stripe::Client>>,
    input: web::Json<CreateOrderInput>,
) -> impl Responder {
    println!("Creating payment order...");

    let booking_object_id = match parse_booking_id(&input.booking_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    // A failed payment is retryable: reset it to pending before opening a
    // fresh order. Anything else except pending has no order to create.
    if booking.payment_status == PaymentStatus::Failed {
        if let Err(err) = booking_status::transition(&mut booking, None, Some(PaymentStatus::Pending))
        {
            return HttpResponse::Conflict().body(err.to_string());
        }
    }
    if booking.payment_status != PaymentStatus::Pending {
        return HttpResponse::Conflict().body(format!(
            "Booking payment is {}, no order to create",
            booking.payment_status.as_str()
        ));
    }

    let amount = (booking.total_amount * 100.0).round() as i64;
    let mut create_intent = CreatePaymentIntent::new(amount, Currency::INR);
    // Manual, as the capture happens on verification
    create_intent.capture_method = Some(PaymentIntentCaptureMethod::Manual);

    let intent = match tokio::time::timeout(
        GATEWAY_TIMEOUT,
        PaymentIntent::create(stripe_data.as_ref(), create_intent),
    )
    .await
    {
        Ok(Ok(intent)) => intent,
        Ok(Err(e)) => {
            eprintln!("Error creating payment intent: {:?}", e);
            return HttpResponse::BadGateway()
                .body(format!("Failed to create payment order: {}", e));
        }
        Err(_) => {
            eprintln!("Payment gateway timed out creating order");
            return HttpResponse::BadGateway().body("Payment gateway timed out");
        }
    };

    booking.payment_order_id = Some(intent.id.to_string());
    if let Err(err) = store.update_booking(&booking).await {
        eprintln!("Error saving payment order on booking: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to update booking");
    }

    HttpResponse::Ok().json(serde_json::json!({
        "booking_id": input.booking_id,
        "order_id": intent.id.to_string(),
        "amount": amount,
        "client_secret": intent.client_secret,
    }))
}

/// Verify and capture a payment. The booking only moves to `paid` (and a
/// pending booking to `confirmed`) on an explicit captured-succeeded
/// response; a timeout or retrieval error leaves it pending.
pub async fn verify_payment(
    store: web::Data<MongoInventory>,
    stripe_data: web::Data<Arc<stripe::Client>>,
    input: web::Json<VerifyPaymentInput>,
) -> impl Responder {
    println!("Verifying payment...");
    let input = input.into_inner();

    let booking_object_id = match parse_booking_id(&input.booking_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    // Reject before touching the gateway so nothing is ever captured for a
    // booking that already ended.
    if booking.status.is_terminal() {
        return HttpResponse::Conflict().body(format!(
            "Booking is {}, payment cannot be captured",
            booking.status.as_str()
        ));
    }

    if booking.payment_order_id.as_deref() != Some(input.payment_intent_id.as_str()) {
        return HttpResponse::BadRequest().body("Payment intent does not belong to this booking");
    }

    let intent_id = match PaymentIntentId::from_str(&input.payment_intent_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid payment intent ID: {:?}", e);
            return HttpResponse::BadRequest().body("Invalid payment intent ID");
        }
    };

    let intent = match tokio::time::timeout(
        GATEWAY_TIMEOUT,
        PaymentIntent::retrieve(stripe_data.as_ref(), &intent_id, &[]),
    )
    .await
    {
        Ok(Ok(intent)) => intent,
        Ok(Err(e)) => {
            eprintln!("Error retrieving payment intent: {:?}", e);
            return HttpResponse::BadGateway()
                .body(format!("Failed to retrieve payment intent: {}", e));
        }
        Err(_) => {
            eprintln!("Payment gateway timed out retrieving intent");
            return HttpResponse::BadGateway()
                .body("Payment gateway timed out; booking left pending");
        }
    };

    if intent.status != PaymentIntentStatus::RequiresCapture {
        return HttpResponse::BadRequest().body(format!(
            "Payment intent is not in a capturable state. Current status: {:?}",
            intent.status
        ));
    }

    let captured = match tokio::time::timeout(
        GATEWAY_TIMEOUT,
        PaymentIntent::capture(
            stripe_data.as_ref(),
            &input.payment_intent_id,
            CapturePaymentIntent::default(),
        ),
    )
    .await
    {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => {
            // Definitive gateway failure: record it, the order can be retried.
            eprintln!("Error capturing payment: {:?}", e);
            if booking_status::transition(&mut booking, None, Some(PaymentStatus::Failed)).is_ok() {
                let _ = store.update_booking(&booking).await;
            }
            return HttpResponse::BadGateway().body(format!("Failed to capture payment: {}", e));
        }
        Err(_) => {
            eprintln!("Payment gateway timed out capturing intent");
            return HttpResponse::BadGateway()
                .body("Payment gateway timed out; booking left pending");
        }
    };

    if captured.status != PaymentIntentStatus::Succeeded {
        return HttpResponse::BadGateway().body(format!(
            "Capture did not succeed, booking left pending. Status: {:?}",
            captured.status
        ));
    }

    let confirm = match booking.status {
        BookingStatus::Pending => Some(BookingStatus::Confirmed),
        _ => None,
    };
    if let Err(err) = booking_status::transition(&mut booking, confirm, Some(PaymentStatus::Paid)) {
        return HttpResponse::Conflict().body(err.to_string());
    }

    match store.update_booking(&booking).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "booking": booking,
        })),
        Err(err) => {
            eprintln!("Error updating booking after capture: {:?}", err);
            HttpResponse::InternalServerError()
                .body("Payment captured but failed to update booking")
        }
    }
}

pub async fn refund_payment(
    store: web::Data<MongoInventory>,
    stripe_data: web::Data<Arc<stripe::Client>>,
    input: web::Json<RefundInput>,
) -> impl Responder {
    println!("Refunding payment...");
    let input = input.into_inner();

    let booking_object_id = match parse_booking_id(&input.booking_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut booking = match store.booking(&booking_object_id).await {
        Ok(booking) => booking,
        Err(StoreError::NotFound) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Error fetching booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch booking");
        }
    };

    if booking.payment_status != PaymentStatus::Paid {
        return HttpResponse::Conflict().body(format!(
            "Only paid bookings can be refunded, payment is {}",
            booking.payment_status.as_str()
        ));
    }

    let order_id = match booking.payment_order_id.as_deref() {
        Some(order_id) => order_id,
        None => return HttpResponse::Conflict().body("Booking has no payment order to refund"),
    };
    let intent_id = match PaymentIntentId::from_str(order_id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid payment order on booking: {:?}", e);
            return HttpResponse::InternalServerError().body("Invalid payment order on booking");
        }
    };

    if let Some(amount) = input.amount {
        if amount <= 0.0 || amount > booking.total_amount {
            return HttpResponse::BadRequest()
                .body("Refund amount must be positive and at most the booking total");
        }
    }

    let mut create_refund = CreateRefund::new();
    create_refund.payment_intent = Some(intent_id);
    create_refund.amount = input.amount.map(|a| (a * 100.0).round() as i64);

    let refund = match tokio::time::timeout(
        GATEWAY_TIMEOUT,
        Refund::create(stripe_data.as_ref(), create_refund),
    )
    .await
    {
        Ok(Ok(refund)) => refund,
        Ok(Err(e)) => {
            eprintln!("Error creating refund: {:?}", e);
            return HttpResponse::BadGateway().body(format!("Failed to refund payment: {}", e));
        }
        Err(_) => {
            eprintln!("Payment gateway timed out creating refund");
            return HttpResponse::BadGateway().body("Payment gateway timed out");
        }
    };

    let partial = input
        .amount
        .map(|a| round_money(a) < round_money(booking.total_amount))
        .unwrap_or(false);
    let target = if partial {
        PaymentStatus::PartiallyRefunded
    } else {
        PaymentStatus::Refunded
    };

    if let Err(err) = booking_status::transition(&mut booking, None, Some(target)) {
        return HttpResponse::Conflict().body(err.to_string());
    }

    if let Some(reason) = input.reason {
        println!("Refund for booking {}: {}", input.booking_id, reason);
    }

    match store.update_booking(&booking).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "refund_id": refund.id.to_string(),
            "booking": booking,
        })),
        Err(err) => {
            eprintln!("Error updating booking after refund: {:?}", err);
            HttpResponse::InternalServerError()
                .body("Refund created but failed to update booking")
        }
    }
}
