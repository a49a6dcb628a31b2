use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::venue::Coordinates;

/// Reference point a city's pseudo-geocoded venues are projected from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityAnchor {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

const DEFAULT_CITY_CENTERS: [(&str, f64, f64); 6] = [
    ("New York", 40.7128, -73.9856),
    ("Chicago", 41.8781, -87.6298),
    ("San Francisco", 37.7749, -122.4194),
    ("Seattle", 47.6062, -122.3321),
    ("Las Vegas", 36.1699, -115.1398),
    ("Los Angeles", 34.0522, -118.2437),
];

static DEFAULT_ANCHORS: OnceLock<CityAnchors> = OnceLock::new();

/// Closed lookup table of supported cities. Lookups are exact on the
/// trimmed city name; anything else is an unknown city.
#[derive(Debug, Clone, Default)]
pub struct CityAnchors {
    anchors: HashMap<String, Coordinates>,
}

impl CityAnchors {
    pub fn new(anchors: impl IntoIterator<Item = CityAnchor>) -> Self {
        Self {
            anchors: anchors
                .into_iter()
                .map(|anchor| (anchor.city.trim().to_string(), (anchor.lat, anchor.lng)))
                .collect(),
        }
    }

    /// The deployment's six supported cities, built once per process.
    pub fn global() -> &'static CityAnchors {
        DEFAULT_ANCHORS.get_or_init(|| {
            CityAnchors::new(DEFAULT_CITY_CENTERS.iter().map(|(city, lat, lng)| CityAnchor {
                city: city.to_string(),
                lat: *lat,
                lng: *lng,
            }))
        })
    }

    pub fn get(&self, city: &str) -> Option<Coordinates> {
        self.anchors.get(city.trim()).copied()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.anchors.contains_key(city.trim())
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.anchors.keys().map(String::as_str).collect();
        cities.sort_unstable();
        cities
    }
}
