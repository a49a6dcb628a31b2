use log::{info, warn};
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{PlannerError, Result};
use crate::models::{
    Attraction, Category, DayPlan, Hotel, Itinerary, RegenerateRequest, Tour, Venue,
};

static KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn key_pattern() -> &'static Regex {
    KEY_PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)_(hotel|tour|attraction)(?:_(\d+))?$").expect("valid replacement key pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Hotel,
    Tour(usize),
    Attraction(usize),
}

impl Slot {
    pub fn category(&self) -> Category {
        match self {
            Slot::Hotel => Category::Hotel,
            Slot::Tour(_) => Category::Tour,
            Slot::Attraction(_) => Category::Attraction,
        }
    }
}

/// A parsed `"<day>_hotel"`, `"<day>_tour_<i>"` or `"<day>_attraction_<i>"`
/// key. Days are numbered as in [`DayPlan::day_index`]; slot indices start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplacementKey {
    pub day: u32,
    pub slot: Slot,
}

impl FromStr for ReplacementKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlannerError::InvalidReplacementKey(s.to_string());
        let caps = key_pattern().captures(s.trim()).ok_or_else(invalid)?;

        let day: u32 = caps[1].parse().map_err(|_| invalid())?;
        let index = caps
            .get(3)
            .map(|m| m.as_str().parse::<usize>())
            .transpose()
            .map_err(|_| invalid())?;

        let slot = match (&caps[2], index) {
            ("hotel", None) => Slot::Hotel,
            ("tour", Some(i)) => Slot::Tour(i),
            ("attraction", Some(i)) => Slot::Attraction(i),
            _ => return Err(invalid()),
        };
        Ok(ReplacementKey { day, slot })
    }
}

/// A key bound to a venue of the slot's category.
enum Replacement<'a> {
    Hotel(&'a Hotel),
    Tour(usize, &'a Tour),
    Attraction(usize, &'a Attraction),
}

impl<'a> Replacement<'a> {
    fn bind(key: &str, slot: Slot, venue: &'a Venue) -> Result<Self> {
        match (slot, venue) {
            (Slot::Hotel, Venue::Hotel(hotel)) => Ok(Replacement::Hotel(hotel)),
            (Slot::Tour(i), Venue::Tour(tour)) => Ok(Replacement::Tour(i, tour)),
            (Slot::Attraction(i), Venue::Attraction(attraction)) => {
                Ok(Replacement::Attraction(i, attraction))
            }
            _ => Err(PlannerError::CategoryMismatch {
                key: key.to_string(),
                expected: slot.category().as_str(),
                found: venue.category().as_str(),
            }),
        }
    }

    /// False when the day has no such slot.
    fn apply(&self, day: &mut DayPlan) -> bool {
        match *self {
            Replacement::Hotel(hotel) => {
                day.hotel = Some(hotel.clone());
                day.notes.retain(|note| note.category != Category::Hotel);
                true
            }
            Replacement::Tour(i, tour) => match day.tours.get_mut(i) {
                Some(current) => {
                    *current = tour.clone();
                    true
                }
                None => false,
            },
            Replacement::Attraction(i, attraction) => match day.attractions.get_mut(i) {
                Some(current) => {
                    *current = attraction.clone();
                    true
                }
                None => false,
            },
        }
    }
}

/// Substitutes the named slots of `days`. Every key is validated before any
/// day is touched; keys naming a day or slot that does not exist are skipped.
pub fn apply_replacements(
    mut days: Vec<DayPlan>,
    replacements: &HashMap<String, Venue>,
) -> Result<Vec<DayPlan>> {
    let mut bound = Vec::with_capacity(replacements.len());
    for (key, venue) in replacements {
        let parsed: ReplacementKey = key.parse()?;
        bound.push((key.as_str(), parsed.day, Replacement::bind(key, parsed.slot, venue)?));
    }

    let mut applied = 0;
    for (key, day_index, replacement) in bound {
        let Some(day) = days.iter_mut().find(|d| d.day_index == day_index) else {
            warn!("Ignoring replacement {}: no day {}", key, day_index);
            continue;
        };
        if replacement.apply(day) {
            applied += 1;
        } else {
            warn!("Ignoring replacement {}: slot does not exist", key);
        }
    }

    info!("Applied {} of {} replacements", applied, replacements.len());
    Ok(days)
}

/// Builds a fresh itinerary from a previous one and the user's swaps.
pub fn regenerate(request: RegenerateRequest) -> Result<Itinerary> {
    let days = apply_replacements(request.original_days, &request.replacements)?;
    Ok(Itinerary::new(request.meta, days))
}
