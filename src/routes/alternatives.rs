use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::{success, AppState};
use crate::error::PlannerError;
use crate::models::{AlternativesRequest, Category, Venue};
use crate::services::alternatives_service::closest_alternatives;

#[derive(Serialize)]
struct Alternatives {
    alternatives: Vec<Venue>,
}

/*
    /api/alternatives
*/
pub async fn get_alternatives(
    state: web::Data<AppState>,
    body: web::Json<AlternativesRequest>,
) -> Result<HttpResponse, PlannerError> {
    let request = body.into_inner();
    let category: Category = request.category.parse()?;
    let max_results = request
        .max_results
        .unwrap_or(state.config.max_alternatives);

    let pool = state
        .repository
        .pool(&request.city, category, request.budget);
    let alternatives = closest_alternatives(&request.current_url, &pool, max_results)
        .into_iter()
        .cloned()
        .collect();

    Ok(success(Alternatives { alternatives }))
}
