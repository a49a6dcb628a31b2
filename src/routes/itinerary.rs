use actix_web::{web, HttpResponse};

use super::{success, AppState};
use crate::error::PlannerError;
use crate::models::{ItineraryRequest, PlanRequest, RegenerateRequest};
use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::replacement_service;

/*
    /api/itineraries/generate
*/
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<ItineraryRequest>,
) -> Result<HttpResponse, PlannerError> {
    let request = body.into_inner();
    // Reject bad dates before touching the catalog.
    state.config.generation.trip_days(&request)?;

    let pools = state.repository.pools(&request);

    let mut generator = ItineraryGenerator::with_config(state.config.generation.clone());
    let itinerary = generator.generate(&request, &pools)?;
    Ok(success(itinerary))
}

/*
    /api/itineraries/plan (pools supplied by the caller)
*/
pub async fn plan(
    state: web::Data<AppState>,
    body: web::Json<PlanRequest>,
) -> Result<HttpResponse, PlannerError> {
    let PlanRequest { request, pools } = body.into_inner();
    let pools = pools.restricted_to(&request);

    let mut generator = ItineraryGenerator::with_config(state.config.generation.clone());
    let itinerary = generator.generate(&request, &pools)?;
    Ok(success(itinerary))
}

/*
    /api/itineraries/regenerate
*/
pub async fn regenerate(body: web::Json<RegenerateRequest>) -> Result<HttpResponse, PlannerError> {
    let itinerary = replacement_service::regenerate(body.into_inner())?;
    Ok(success(itinerary))
}
