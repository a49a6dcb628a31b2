use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use trip_planner::config::AppConfig;
use trip_planner::routes::{self, AppState};
use trip_planner::services::hotel_file_service::read_geocoded_records;
use trip_planner::services::venue_repository::{InMemoryVenueRepository, VenueRepository};

fn load_catalog(config: &AppConfig) -> std::io::Result<InMemoryVenueRepository> {
    let mut repository = match &config.catalog_path {
        Some(path) => InMemoryVenueRepository::load_json(path, config.budget)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?,
        None => {
            warn!("VENUE_CATALOG_PATH not set, starting with an empty catalog");
            InMemoryVenueRepository::new(config.budget)
        }
    };

    if let Some(path) = &config.geocoded_hotels_path {
        let records = read_geocoded_records(path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        repository.merge_geocoded_hotels(records);
    }
    Ok(repository)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let repository = load_catalog(&config)?;
    info!("Catalog ready for cities: {:?}", repository.cities());

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(AppState::new(Arc::new(repository), config));

    info!("Starting HTTP server on {}:{}", host, port);

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
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
