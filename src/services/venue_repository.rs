use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::BudgetLimits;
use crate::error::Result;
use crate::models::{
    Attraction, BudgetTier, Category, GeocodedHotelRecord, Hotel, ItineraryRequest, Place, Tour,
    Venue, VenuePools,
};

static PRICE_NUMBER: OnceLock<Regex> = OnceLock::new();

fn price_number() -> &'static Regex {
    PRICE_NUMBER.get_or_init(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid price pattern"))
}

/// First number in a price text such as `"$1,299 per night"`.
pub fn parse_price(text: &str) -> Option<f64> {
    price_number()
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

/// Source of the candidate pools for a city and budget tier.
pub trait VenueRepository: Send + Sync {
    fn hotels(&self, city: &str, budget: BudgetTier) -> Vec<Hotel>;
    fn tours(&self, city: &str, budget: BudgetTier) -> Vec<Tour>;
    fn attractions(&self, city: &str, budget: BudgetTier) -> Vec<Attraction>;
    fn cities(&self) -> Vec<String>;

    /// Pools for a request; excluded categories come back empty.
    fn pools(&self, request: &ItineraryRequest) -> VenuePools {
        let city = request.city.as_str();
        let budget = request.budget;
        VenuePools {
            hotels: if request.includes(Category::Hotel) {
                self.hotels(city, budget)
            } else {
                Vec::new()
            },
            tours: if request.includes(Category::Tour) {
                self.tours(city, budget)
            } else {
                Vec::new()
            },
            attractions: if request.includes(Category::Attraction) {
                self.attractions(city, budget)
            } else {
                Vec::new()
            },
        }
    }

    fn pool(&self, city: &str, category: Category, budget: BudgetTier) -> Vec<Venue> {
        match category {
            Category::Hotel => self.hotels(city, budget).into_iter().map(Venue::from).collect(),
            Category::Tour => self.tours(city, budget).into_iter().map(Venue::from).collect(),
            Category::Attraction => self
                .attractions(city, budget)
                .into_iter()
                .map(Venue::from)
                .collect(),
        }
    }
}

/// Catalog held in memory, keyed by trimmed city name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVenueRepository {
    cities: HashMap<String, VenuePools>,
    budget: BudgetLimits,
}

impl InMemoryVenueRepository {
    pub fn new(budget: BudgetLimits) -> Self {
        Self {
            cities: HashMap::new(),
            budget,
        }
    }

    pub fn with_city(mut self, city: &str, pools: VenuePools) -> Self {
        self.insert_city(city, pools);
        self
    }

    pub fn insert_city(&mut self, city: &str, pools: VenuePools) {
        self.cities.insert(city.trim().to_string(), pools);
    }

    /// Reads a catalog of the form `{ "<city>": { hotels, tours, attractions } }`.
    pub fn load_json(path: &Path, budget: BudgetLimits) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let catalog: HashMap<String, VenuePools> = serde_json::from_reader(reader)?;

        let mut repository = Self::new(budget);
        for (city, pools) in catalog {
            debug!(
                "Catalog {}: {} hotels, {} tours, {} attractions",
                city,
                pools.hotels.len(),
                pools.tours.len(),
                pools.attractions.len()
            );
            repository.insert_city(&city, pools);
        }
        info!(
            "Loaded venue catalog for {} cities from {}",
            repository.cities.len(),
            path.display()
        );
        Ok(repository)
    }

    /// Adds geocoded hotels to their city's pool, skipping any whose
    /// identity the pool already holds. Returns how many were added.
    pub fn merge_geocoded_hotels(&mut self, records: Vec<GeocodedHotelRecord>) -> usize {
        let mut added = 0;
        for record in records {
            let city = record.city.trim().to_string();
            if city.is_empty() {
                continue;
            }
            let hotel = Hotel::from(record);
            let pools = self.cities.entry(city).or_default();
            if pools.hotels.iter().any(|h| h.identity() == hotel.identity()) {
                continue;
            }
            pools.hotels.push(hotel);
            added += 1;
        }
        info!("Merged {} geocoded hotels into the catalog", added);
        added
    }

    fn city_pools(&self, city: &str) -> Option<&VenuePools> {
        self.cities.get(city.trim())
    }

    fn within_budget<'a, P: Place + Clone + 'a>(
        &self,
        venues: impl IntoIterator<Item = &'a P>,
        budget: BudgetTier,
    ) -> Vec<P> {
        let ceiling = self.budget.ceiling(budget);
        venues
            .into_iter()
            .filter(|venue| match (ceiling, venue.price().and_then(parse_price)) {
                (Some(max), Some(price)) => price <= max,
                _ => true,
            })
            .cloned()
            .collect()
    }
}

impl VenueRepository for InMemoryVenueRepository {
    fn hotels(&self, city: &str, budget: BudgetTier) -> Vec<Hotel> {
        self.city_pools(city)
            .map(|pools| self.within_budget(&pools.hotels, budget))
            .unwrap_or_default()
    }

    fn tours(&self, city: &str, budget: BudgetTier) -> Vec<Tour> {
        self.city_pools(city)
            .map(|pools| self.within_budget(&pools.tours, budget))
            .unwrap_or_default()
    }

    fn attractions(&self, city: &str, budget: BudgetTier) -> Vec<Attraction> {
        self.city_pools(city)
            .map(|pools| self.within_budget(&pools.attractions, budget))
            .unwrap_or_default()
    }

    fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self.cities.keys().cloned().collect();
        cities.sort();
        cities
    }
}
