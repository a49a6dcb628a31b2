use actix_web::{error, web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::venue_repository::VenueRepository;

pub mod alternatives;
pub mod health;
pub mod itinerary;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub repository: Arc<dyn VenueRepository>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn VenueRepository>, config: AppConfig) -> Self {
        Self { repository, config }
    }
}

#[derive(Serialize)]
struct Success<T> {
    status: &'static str,
    data: T,
}

pub(crate) fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        status: "success",
        data,
    })
}

// Malformed bodies (bad dates included) are validation failures, not bad syntax.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(json!({
        "status": "error",
        "detail": err.to_string(),
    }));
    error::InternalError::from_response(err, response).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(health::online))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/itineraries")
                        .route("/generate", web::post().to(itinerary::generate))
                        .route("/plan", web::post().to(itinerary::plan))
                        .route("/regenerate", web::post().to(itinerary::regenerate)),
                )
                .route("/alternatives", web::post().to(alternatives::get_alternatives)),
        );
}
