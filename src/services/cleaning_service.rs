use log::info;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::models::HotelRecord;

const NOT_AVAILABLE: &str = "N/A";

static REVIEWS_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn reviews_suffix() -> &'static Regex {
    REVIEWS_SUFFIX.get_or_init(|| Regex::new(r"(?i)\s+reviews?\s*$").expect("valid reviews pattern"))
}

fn clean_rating(rating: &str) -> String {
    match rating.parse::<f64>() {
        Ok(value) if value.is_finite() => rating.to_string(),
        _ => String::new(),
    }
}

fn clean_reviews(reviews: &str) -> String {
    let stripped = reviews_suffix().replace(reviews, "");
    let digits = stripped.replace(',', "");
    let digits = digits.trim();
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => digits.to_string(),
        _ => String::new(),
    }
}

fn clean_price(price: &str) -> String {
    price.replace("USD ", "$").replace("USD", "$").trim().to_string()
}

fn or_not_available(value: String) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}

fn trim_record(record: HotelRecord) -> HotelRecord {
    HotelRecord {
        city: record.city.trim().to_string(),
        name: record.name.trim().to_string(),
        link: record.link.trim().to_string(),
        image: record.image.trim().to_string(),
        address: record.address.trim().to_string(),
        distance: record.distance.trim().to_string(),
        rating: record.rating.trim().to_string(),
        reviews: record.reviews.trim().to_string(),
        price_per_night: record.price_per_night.trim().to_string(),
        room_fees: record.room_fees.trim().to_string(),
        exclusions: record.exclusions.trim().to_string(),
        certified: record.certified.trim().to_string(),
    }
}

/// Normalises scraped hotel rows ahead of geocoding. Rows without a name or
/// link are dropped, as are repeats of an earlier (name, address) pair.
pub fn clean_hotel_records(records: Vec<HotelRecord>) -> Vec<HotelRecord> {
    let loaded = records.len();
    let mut seen = HashSet::new();

    let cleaned: Vec<HotelRecord> = records
        .into_iter()
        .map(trim_record)
        .filter(|r| !r.name.is_empty() && !r.link.is_empty())
        .filter(|r| seen.insert((r.name.clone(), r.address.clone())))
        .map(|r| HotelRecord {
            rating: clean_rating(&r.rating),
            reviews: clean_reviews(&r.reviews),
            price_per_night: clean_price(&r.price_per_night),
            room_fees: or_not_available(r.room_fees),
            exclusions: or_not_available(r.exclusions),
            certified: or_not_available(r.certified),
            ..r
        })
        .collect();

    info!(
        "Cleaned hotel records: {} loaded, {} kept",
        loaded,
        cleaned.len()
    );
    cleaned
}
