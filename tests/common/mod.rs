#![allow(dead_code)]

use actix_web::{web, App};
use std::sync::Arc;

use trip_planner::config::{AppConfig, BudgetLimits};
use trip_planner::models::{Attraction, Coordinates, Hotel, Tour, VenuePools};
use trip_planner::routes::{self, AppState};
use trip_planner::services::distance_service::project;
use trip_planner::services::venue_repository::InMemoryVenueRepository;

pub const NEW_YORK: Coordinates = (40.7128, -73.9856);

pub fn hotel(name: &str, coords: Option<Coordinates>, price: &str) -> Hotel {
    Hotel {
        name: Some(name.to_string()),
        link: Some(format!("https://hotels.example.com/{}", name.replace(' ', "-"))),
        city: Some("New York".to_string()),
        price: Some(price.to_string()),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        ..Default::default()
    }
}

pub fn tour(title: &str) -> Tour {
    Tour {
        title: Some(title.to_string()),
        url: Some(format!("https://tours.example.com/{}", title.replace(' ', "-"))),
        ..Default::default()
    }
}

pub fn attraction(name: &str, coords: Coordinates) -> Attraction {
    Attraction {
        placename: Some(name.to_string()),
        latitude: Some(coords.0),
        longitude: Some(coords.1),
        ..Default::default()
    }
}

/// Four hotels, six tours and two attractions around midtown Manhattan.
/// The attractions straddle the city anchor, so "Midtown Inn" is the
/// nearest hotel to their centroid while "Harbor Hotel" leads the pool.
pub fn new_york_pools() -> VenuePools {
    VenuePools {
        hotels: vec![
            hotel("Harbor Hotel", Some(project(NEW_YORK, 5.0, 200.0)), "$210"),
            hotel("Midtown Inn", Some(project(NEW_YORK, 1.0, 90.0)), "$129"),
            hotel("Airport Lodge", Some(project(NEW_YORK, 18.0, 110.0)), "$95"),
            hotel("Park Palace", None, "$850"),
        ],
        tours: vec![
            tour("Harbor Cruise"),
            tour("Food Walk"),
            tour("Helicopter Ride"),
            tour("Jazz Night"),
            tour("Brooklyn Bridge Walk"),
            tour("Museum Pass"),
        ],
        attractions: vec![
            attraction("Bryant Park", project(NEW_YORK, 0.8, 0.0)),
            attraction("Union Square", project(NEW_YORK, 0.8, 180.0)),
        ],
    }
}

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let repository = InMemoryVenueRepository::new(BudgetLimits::default())
            .with_city("New York", new_york_pools());
        Self {
            state: web::Data::new(AppState::new(Arc::new(repository), config)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(routes::configure)
    }
}
