use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use innkeep_api::{db, routes, services::inventory::MongoInventory};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    let inventory = MongoInventory::new(client.clone());

    let stripe_secret = std::env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set");
    let stripe_client = Arc::new(stripe::Client::new(stripe_secret));

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(inventory.clone()))
            .app_data(web::Data::new(stripe_client.clone()))
            .service(
                web::scope("/api")
                    .route("/room-types", web::get().to(routes::room::get_room_types))
                    .route("/rooms", web::get().to(routes::room::get_rooms))
                    .route(
                        "/rooms/{id}/status",
                        web::put().to(routes::room::update_room_status),
                    )
                    .service(
                        web::scope("/bookings")
                            .route("", web::post().to(routes::booking::create_booking))
                            .route("", web::get().to(routes::booking::get_all_bookings))
                            .route("/{id}", web::get().to(routes::booking::get_booking_by_id))
                            .route("/{id}", web::put().to(routes::booking::update_booking))
                            .route(
                                "/{id}/availability",
                                web::post().to(routes::booking::check_availability),
                            )
                            .route(
                                "/{id}/allocate",
                                web::post().to(routes::allocation::allocate_room),
                            )
                            .route(
                                "/{id}/upgrades",
                                web::get().to(routes::upgrade::list_upgrade_options),
                            )
                            .route(
                                "/{id}/upgrade",
                                web::post().to(routes::upgrade::apply_upgrade),
                            ),
                    )
                    .service(
                        web::scope("/payments")
                            .route(
                                "/create-order",
                                web::post().to(routes::payment::create_order),
                            )
                            .route("/verify", web::post().to(routes::payment::verify_payment))
                            .route("/refund", web::post().to(routes::payment::refund_payment)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
