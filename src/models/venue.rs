use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

/// Latitude, longitude in degrees.
pub type Coordinates = (f64, f64);

/// Behaviour shared by hotels, tours and attractions.
pub trait Place {
    fn name(&self) -> Option<&str>;
    fn url(&self) -> Option<&str>;
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
    fn price(&self) -> Option<&str>;

    fn distance_text(&self) -> Option<&str> {
        None
    }

    /// Deduplication key: the name, or the URL when the name is blank.
    /// Venues with neither share the empty identity.
    fn identity(&self) -> &str {
        non_blank(self.name())
            .or_else(|| non_blank(self.url()))
            .unwrap_or("")
    }

    fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude(), self.longitude()) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }

    /// True when `identity` names this venue by either its name or its URL.
    fn matches(&self, identity: &str) -> bool {
        let identity = identity.trim();
        !identity.is_empty()
            && (non_blank(self.name()) == Some(identity) || non_blank(self.url()) == Some(identity))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(default, alias = "NAME", alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "LINK", alias = "Link", alias = "URL", alias = "url")]
    pub link: Option<String>,
    #[serde(default, alias = "CITY", alias = "City")]
    pub city: Option<String>,
    #[serde(default, alias = "IMAGE", alias = "Image")]
    pub image: Option<String>,
    #[serde(default, alias = "ADDRESS", alias = "Address")]
    pub address: Option<String>,
    #[serde(
        default,
        alias = "DISTANCE",
        alias = "Distance",
        alias = "distance_from_center"
    )]
    pub distance: Option<String>,
    #[serde(
        default,
        alias = "RATING",
        alias = "Rating",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        alias = "REVIEWS",
        alias = "Reviews",
        deserialize_with = "deserialize_lenient_u32"
    )]
    pub reviews: Option<u32>,
    #[serde(
        default,
        alias = "PRICE",
        alias = "Price (per night)",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub price: Option<String>,
    #[serde(default, alias = "CERTIFIED", alias = "Certified")]
    pub certified: Option<String>,
    #[serde(
        default,
        alias = "LATITUDE",
        alias = "Latitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        alias = "LONGITUDE",
        alias = "Longitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default, alias = "TITLE", alias = "Title", alias = "name")]
    pub title: Option<String>,
    #[serde(default, alias = "URL", alias = "Link")]
    pub url: Option<String>,
    #[serde(default, alias = "IMAGE", alias = "Image")]
    pub image: Option<String>,
    #[serde(
        default,
        alias = "RATING",
        alias = "Rating",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        alias = "REVIEW COUNT",
        alias = "REVIEW_COUNT",
        deserialize_with = "deserialize_lenient_u32"
    )]
    pub review_count: Option<u32>,
    #[serde(
        default,
        alias = "PRICE",
        alias = "Price",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub price: Option<String>,
    #[serde(
        default,
        alias = "LATITUDE",
        alias = "Latitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        alias = "LONGITUDE",
        alias = "Longitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    #[serde(default, alias = "PLACENAME", alias = "Placename", alias = "name")]
    pub placename: Option<String>,
    #[serde(default, alias = "URL", alias = "Link")]
    pub url: Option<String>,
    #[serde(default, alias = "IMAGE", alias = "Image")]
    pub image: Option<String>,
    #[serde(default, alias = "ADDRESS", alias = "Address")]
    pub address: Option<String>,
    #[serde(default, alias = "DESCRIPTION", alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "TICKET DETAILS", alias = "Ticket Details")]
    pub ticket_details: Option<String>,
    #[serde(default, alias = "HOURS", alias = "Hours")]
    pub hours: Option<String>,
    #[serde(default, alias = "HOW TO REACH", alias = "How to Reach")]
    pub how_to_reach: Option<String>,
    #[serde(
        default,
        alias = "PRICE",
        alias = "Price",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub price: Option<String>,
    #[serde(
        default,
        alias = "LATITUDE",
        alias = "Latitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        alias = "LONGITUDE",
        alias = "Longitude",
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub longitude: Option<f64>,
}

impl Place for Hotel {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn url(&self) -> Option<&str> {
        self.link.as_deref()
    }

    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }

    fn distance_text(&self) -> Option<&str> {
        self.distance.as_deref()
    }
}

impl Place for Tour {
    fn name(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }
}

impl Place for Attraction {
    fn name(&self) -> Option<&str> {
        self.placename.as_deref()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    fn price(&self) -> Option<&str> {
        self.price.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotel,
    Tour,
    Attraction,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotel => "hotel",
            Category::Tour => "tour",
            Category::Attraction => "attraction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" | "hotels" | "accommodation" => Ok(Category::Hotel),
            "tour" | "tours" => Ok(Category::Tour),
            "attraction" | "attractions" | "things to do" => Ok(Category::Attraction),
            other => Err(PlannerError::UnknownCategory(other.to_string())),
        }
    }
}

/// A venue of any category, tagged with `"category"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Venue {
    Hotel(Hotel),
    Tour(Tour),
    Attraction(Attraction),
}

impl Venue {
    pub fn category(&self) -> Category {
        match self {
            Venue::Hotel(_) => Category::Hotel,
            Venue::Tour(_) => Category::Tour,
            Venue::Attraction(_) => Category::Attraction,
        }
    }

    fn place(&self) -> &dyn Place {
        match self {
            Venue::Hotel(hotel) => hotel,
            Venue::Tour(tour) => tour,
            Venue::Attraction(attraction) => attraction,
        }
    }
}

impl Place for Venue {
    fn name(&self) -> Option<&str> {
        self.place().name()
    }

    fn url(&self) -> Option<&str> {
        self.place().url()
    }

    fn latitude(&self) -> Option<f64> {
        self.place().latitude()
    }

    fn longitude(&self) -> Option<f64> {
        self.place().longitude()
    }

    fn price(&self) -> Option<&str> {
        self.place().price()
    }

    fn distance_text(&self) -> Option<&str> {
        self.place().distance_text()
    }
}

impl From<Hotel> for Venue {
    fn from(hotel: Hotel) -> Self {
        Venue::Hotel(hotel)
    }
}

impl From<Tour> for Venue {
    fn from(tour: Tour) -> Self {
        Venue::Tour(tour)
    }
}

impl From<Attraction> for Venue {
    fn from(attraction: Attraction) -> Self {
        Venue::Attraction(attraction)
    }
}

// Warehouse exports mix numbers, numeric strings and blanks in the same column.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite()),
        _ => None,
    })
}

fn deserialize_lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
