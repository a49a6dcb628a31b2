use serde::{Deserialize, Serialize};

use super::venue::Hotel;

/// Column order of the geocoded hotel file. The warehouse loader binds
/// columns by position, so this order must not change.
pub const GEOCODED_COLUMNS: [&str; 15] = [
    "City",
    "Name",
    "Link",
    "Image",
    "Address",
    "Distance",
    "Rating",
    "Reviews",
    "Price (per night)",
    "Room Fees",
    "Exclusions",
    "Certified",
    "Latitude",
    "Longitude",
    "CalculationMethod",
];

/// One row of the scraped hotel CSV. Missing columns read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelRecord {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Distance")]
    pub distance: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
    #[serde(rename = "Price (per night)")]
    pub price_per_night: String,
    #[serde(rename = "Room Fees")]
    pub room_fees: String,
    #[serde(rename = "Exclusions")]
    pub exclusions: String,
    #[serde(rename = "Certified")]
    pub certified: String,
}

/// A hotel row with the three columns the geocoder appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedHotelRecord {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Distance")]
    pub distance: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
    #[serde(rename = "Price (per night)")]
    pub price_per_night: String,
    #[serde(rename = "Room Fees")]
    pub room_fees: String,
    #[serde(rename = "Exclusions")]
    pub exclusions: String,
    #[serde(rename = "Certified")]
    pub certified: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "CalculationMethod")]
    pub calculation_method: String,
}

impl GeocodedHotelRecord {
    pub fn from_record(
        record: HotelRecord,
        coordinates: Option<(f64, f64)>,
        calculation_method: String,
    ) -> Self {
        Self {
            city: record.city,
            name: record.name,
            link: record.link,
            image: record.image,
            address: record.address,
            distance: record.distance,
            rating: record.rating,
            reviews: record.reviews,
            price_per_night: record.price_per_night,
            room_fees: record.room_fees,
            exclusions: record.exclusions,
            certified: record.certified,
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lng)| lng),
            calculation_method,
        }
    }
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<GeocodedHotelRecord> for Hotel {
    fn from(record: GeocodedHotelRecord) -> Self {
        Hotel {
            rating: record.rating.trim().parse().ok(),
            reviews: record
                .reviews
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .ok(),
            name: blank_to_none(record.name),
            link: blank_to_none(record.link),
            city: blank_to_none(record.city),
            image: blank_to_none(record.image),
            address: blank_to_none(record.address),
            distance: blank_to_none(record.distance),
            price: blank_to_none(record.price_per_night),
            certified: blank_to_none(record.certified),
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}
