//! Pseudo-geocoding for venues scraped without coordinates.
//!
//! A venue is placed by projecting from its city's anchor along a bearing
//! derived from its name, at the distance quoted in its "from city center"
//! text. The bearing is synthetic but stable, so a venue lands on the same
//! coordinate on every run. Every input produces exactly one output; rows
//! that cannot be placed properly fall back to a lower-fidelity method.

use log::{debug, info, warn};
use rayon::prelude::*;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::models::{
    CityAnchors, Coordinates, Degradation, GeocodedHotelRecord, Hotel, HotelRecord,
};
use crate::services::distance_service::project;

const PROGRESS_EVERY: usize = 20;

static KM_SEGMENT: OnceLock<Regex> = OnceLock::new();

fn km_segment() -> &'static Regex {
    KM_SEGMENT.get_or_init(|| {
        Regex::new(r"(?i)\(\s*(\d+(?:\.\d+)?|\.\d+)\s*km\s*\)").expect("valid km pattern")
    })
}

/// Kilometres from text such as `"0.17 mi (0.28 km) from city center"`.
pub fn parse_distance_km(text: &str) -> Option<f64> {
    km_segment()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|km| km.is_finite())
}

/// Sum of the name's code points, mod 360.
pub fn name_bearing(name: &str) -> u32 {
    let sum: u64 = name.trim().chars().map(|c| c as u64).sum();
    (sum % 360) as u32
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeMethod {
    DistanceBased { distance_km: f64, bearing: u32 },
    CityCenter,
    UnknownCity,
}

impl GeocodeMethod {
    pub fn degradation(&self) -> Option<Degradation> {
        match self {
            GeocodeMethod::DistanceBased { .. } => None,
            GeocodeMethod::CityCenter => Some(Degradation::UnparseableDistance),
            GeocodeMethod::UnknownCity => Some(Degradation::UnknownCity),
        }
    }
}

fn format_km(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{:.1}", km)
    } else {
        km.to_string()
    }
}

impl fmt::Display for GeocodeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeMethod::DistanceBased {
                distance_km,
                bearing,
            } => write!(
                f,
                "Distance-based ({} km from city center, angle {}°)",
                format_km(*distance_km),
                bearing
            ),
            GeocodeMethod::CityCenter => f.write_str("City center (couldn't parse distance)"),
            GeocodeMethod::UnknownCity => f.write_str("Unknown city"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeResult {
    pub coordinates: Option<Coordinates>,
    pub method: GeocodeMethod,
}

/// A venue copy carrying its derived coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Geocoded<T> {
    pub venue: T,
    pub method: GeocodeMethod,
}

pub struct Geocoder<'a> {
    anchors: &'a CityAnchors,
}

impl Default for Geocoder<'static> {
    fn default() -> Self {
        Self::new(CityAnchors::global())
    }
}

impl<'a> Geocoder<'a> {
    pub fn new(anchors: &'a CityAnchors) -> Self {
        Self { anchors }
    }

    pub fn locate(&self, name: &str, city: &str, distance_text: &str) -> GeocodeResult {
        let Some(anchor) = self.anchors.get(city) else {
            return GeocodeResult {
                coordinates: None,
                method: GeocodeMethod::UnknownCity,
            };
        };

        match parse_distance_km(distance_text) {
            Some(distance_km) => {
                let bearing = name_bearing(name);
                GeocodeResult {
                    coordinates: Some(project(anchor, distance_km, bearing as f64)),
                    method: GeocodeMethod::DistanceBased {
                        distance_km,
                        bearing,
                    },
                }
            }
            None => {
                debug!("Could not parse distance {:?} for {}", distance_text, name);
                GeocodeResult {
                    coordinates: Some(anchor),
                    method: GeocodeMethod::CityCenter,
                }
            }
        }
    }

    /// Places a hotel from its own city, name and distance text.
    pub fn geocode_hotel(&self, hotel: &Hotel) -> Geocoded<Hotel> {
        let result = self.locate(
            hotel.name.as_deref().unwrap_or(""),
            hotel.city.as_deref().unwrap_or(""),
            hotel.distance.as_deref().unwrap_or(""),
        );
        let mut venue = hotel.clone();
        venue.latitude = result.coordinates.map(|(lat, _)| lat);
        venue.longitude = result.coordinates.map(|(_, lng)| lng);
        Geocoded {
            venue,
            method: result.method,
        }
    }

    pub fn geocode_record(&self, record: HotelRecord) -> GeocodedHotelRecord {
        let result = self.locate(&record.name, &record.city, &record.distance);
        GeocodedHotelRecord::from_record(record, result.coordinates, result.method.to_string())
    }

    /// Geocodes a batch in parallel; output order matches input order.
    pub fn geocode_records(&self, records: Vec<HotelRecord>) -> Vec<GeocodedHotelRecord> {
        let total = records.len();
        info!("Total hotels to process: {}", total);

        let geocoded: Vec<GeocodedHotelRecord> = records
            .into_par_iter()
            .enumerate()
            .map(|(idx, record)| {
                if idx == 0 || (idx + 1) % PROGRESS_EVERY == 0 {
                    info!("Processing hotel {}/{}: {}", idx + 1, total, record.name.trim());
                }
                self.geocode_record(record)
            })
            .collect();

        let unknown = geocoded
            .iter()
            .filter(|r| r.latitude.is_none())
            .count();
        if unknown > 0 {
            warn!("{} of {} hotels are in cities without an anchor", unknown, total);
        }
        geocoded
    }
}
