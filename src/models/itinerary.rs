use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::degradation::DayNote;
use super::venue::{Attraction, Category, Hotel, Tour, Venue};
use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelType {
    #[default]
    Solo,
    #[serde(rename = "With Family")]
    WithFamily,
}

fn default_adults() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
    #[serde(default)]
    pub travel_type: TravelType,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub kids: u32,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default = "default_true")]
    pub include_tours: bool,
    #[serde(default = "default_true")]
    pub include_accommodation: bool,
    #[serde(default = "default_true")]
    pub include_things: bool,
}

impl ItineraryRequest {
    /// Inclusive day count. Fails when the end date precedes the start date.
    pub fn num_days(&self) -> Result<u32> {
        let span = (self.end_date - self.start_date).num_days();
        if span < 0 {
            return Err(PlannerError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(u32::try_from(span).map_or(u32::MAX, |days| days.saturating_add(1)))
    }

    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Hotel => self.include_accommodation,
            Category::Tour => self.include_tours,
            Category::Attraction => self.include_things,
        }
    }

    pub fn meta(&self) -> TripMeta {
        TripMeta {
            city: self.city.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            travel_type: self.travel_type,
            adults: self.adults,
            kids: self.kids,
            budget: self.budget,
        }
    }
}

/// The three candidate pools for one itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenuePools {
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub tours: Vec<Tour>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
}

impl VenuePools {
    /// Drops the pools of categories the request excludes.
    pub fn restricted_to(mut self, request: &ItineraryRequest) -> Self {
        if !request.includes(Category::Hotel) {
            self.hotels.clear();
        }
        if !request.includes(Category::Tour) {
            self.tours.clear();
        }
        if !request.includes(Category::Attraction) {
            self.attractions.clear();
        }
        self
    }
}

/// Itinerary request carrying its own pools instead of using the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    #[serde(flatten)]
    pub request: ItineraryRequest,
    #[serde(flatten)]
    pub pools: VenuePools,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(rename = "day")]
    pub day_index: u32,
    pub date: NaiveDate,
    pub hotel: Option<Hotel>,
    #[serde(default)]
    pub tours: Vec<Tour>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<DayNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMeta {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub travel_type: TravelType,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub kids: u32,
    #[serde(default)]
    pub budget: BudgetTier,
}

/// Structured payload handed to the text generation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: Uuid,
    #[serde(flatten)]
    pub meta: TripMeta,
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    pub fn new(meta: TripMeta, days: Vec<DayPlan>) -> Self {
        Self {
            id: Uuid::new_v4(),
            meta,
            days,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegenerateRequest {
    pub meta: TripMeta,
    pub original_days: Vec<DayPlan>,
    #[serde(default)]
    pub replacements: HashMap<String, Venue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlternativesRequest {
    pub city: String,
    pub category: String,
    #[serde(alias = "current_identity")]
    pub current_url: String,
    #[serde(default)]
    pub budget: BudgetTier,
    #[serde(default)]
    pub max_results: Option<usize>,
}
