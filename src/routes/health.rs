use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    message: &'static str,
    cities: usize,
}

/*
    /
*/
pub async fn online() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "online" }))
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        message: "Service is running",
        cities: state.repository.cities().len(),
    })
}
