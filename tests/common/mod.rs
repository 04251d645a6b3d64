use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use mongodb::Client;

use innkeep_api::routes;
use innkeep_api::services::inventory::MongoInventory;

pub struct TestApp {
    pub client: Arc<Client>,
    pub inventory: MongoInventory,
    pub stripe: Arc<stripe::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        // Lazy client: nothing connects until a handler actually queries, so
        // tests exercising validation paths need no running MongoDB.
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Arc::new(
            Client::with_uri_str(&mongo_uri)
                .await
                .expect("failed to build MongoDB client"),
        );
        let inventory = MongoInventory::new(client.clone());
        let stripe = Arc::new(stripe::Client::new("sk_test_dummy".to_string()));

        Self {
            client,
            inventory,
            stripe,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.client.clone()))
            .app_data(web::Data::new(self.inventory.clone()))
            .app_data(web::Data::new(self.stripe.clone()))
            .route("/health", web::get().to(routes::health::health_check))
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
    }
}
