use crate::error::{PlannerError, Result};
use crate::models::{
    Attraction, Category, DayNote, DayPlan, Degradation, Itinerary, ItineraryRequest, Place, Tour,
    VenuePools,
};
use crate::services::hotel_selection_service::closest_hotel;
use chrono::{Duration, NaiveDate};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const MAX_TOURS_PER_DAY: usize = 2;
pub const MAX_ATTRACTIONS_PER_DAY: usize = 2;
pub const MAX_TRIP_DAYS: u32 = 60;

/// What a day gets once every identity in a pool has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Later days get nothing more from the exhausted pool.
    #[default]
    NoRepeat,
    /// Start over from the shuffled pool. A repeat only happens after every
    /// identity has appeared, and never twice on the same day.
    WrapAround,
}

impl FromStr for ExhaustionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "no-repeat" | "norepeat" | "none" => Ok(ExhaustionPolicy::NoRepeat),
            "wrap" | "wrap-around" | "wraparound" => Ok(ExhaustionPolicy::WrapAround),
            other => Err(format!("unknown exhaustion policy: {}", other)),
        }
    }
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustionPolicy::NoRepeat => f.write_str("no-repeat"),
            ExhaustionPolicy::WrapAround => f.write_str("wrap"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ItineraryGenerationConfig {
    pub max_tours_per_day: usize,
    pub max_attractions_per_day: usize,
    pub exhaustion_policy: ExhaustionPolicy,
    pub max_trip_days: u32,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            max_tours_per_day: MAX_TOURS_PER_DAY,
            max_attractions_per_day: MAX_ATTRACTIONS_PER_DAY,
            exhaustion_policy: ExhaustionPolicy::default(),
            max_trip_days: MAX_TRIP_DAYS,
        }
    }
}

impl ItineraryGenerationConfig {
    /// Inclusive day count of the request, bounded by `max_trip_days`.
    pub fn trip_days(&self, request: &ItineraryRequest) -> Result<u32> {
        let days = request.num_days()?;
        if days > self.max_trip_days {
            return Err(PlannerError::TripTooLong {
                days,
                max: self.max_trip_days,
            });
        }
        Ok(days)
    }
}

/// Hands out a shuffled pool a few items per day, tracking used identities.
struct PoolScanner<'a, T> {
    items: Vec<&'a T>,
    used: HashSet<&'a str>,
    cap: usize,
    policy: ExhaustionPolicy,
}

impl<'a, T: Place> PoolScanner<'a, T> {
    fn new<R: Rng>(pool: &'a [T], cap: usize, policy: ExhaustionPolicy, rng: &mut R) -> Self {
        let mut items: Vec<&'a T> = pool.iter().collect();
        items.shuffle(rng);
        Self {
            items,
            used: HashSet::new(),
            cap,
            policy,
        }
    }

    fn scan(&mut self, picks: &mut Vec<&'a T>, today: &HashSet<&'a str>) {
        for &item in &self.items {
            if picks.len() >= self.cap {
                break;
            }
            let identity = item.identity();
            if today.contains(identity) {
                continue;
            }
            if self.used.insert(identity) {
                picks.push(item);
            }
        }
    }

    fn next_day(&mut self) -> (Vec<&'a T>, Option<Degradation>) {
        let mut picks = Vec::with_capacity(self.cap);
        self.scan(&mut picks, &HashSet::new());

        if picks.len() < self.cap && !self.items.is_empty() {
            match self.policy {
                ExhaustionPolicy::NoRepeat => return (picks, Some(Degradation::PoolExhausted)),
                ExhaustionPolicy::WrapAround => {
                    // Today's picks are skipped but left unused in the new cycle.
                    let today: HashSet<&'a str> = picks.iter().map(|&item| item.identity()).collect();
                    self.used.clear();
                    self.scan(&mut picks, &today);
                }
            }
        }
        (picks, None)
    }
}

/// Spreads tour and attraction pools over the days of a trip and sites a
/// hotel for each day. The random source only drives the initial shuffle.
pub struct ItineraryGenerator<R: Rng = StdRng> {
    config: ItineraryGenerationConfig,
    rng: R,
}

impl ItineraryGenerator<StdRng> {
    /// Generator with default settings, seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_config(ItineraryGenerationConfig::default())
    }

    pub fn with_config(config: ItineraryGenerationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for ItineraryGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ItineraryGenerator<R> {
    pub fn with_rng(config: ItineraryGenerationConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ItineraryGenerationConfig {
        &self.config
    }

    /// Validates the date range, then allocates the pools over it.
    pub fn generate(&mut self, request: &ItineraryRequest, pools: &VenuePools) -> Result<Itinerary> {
        let num_days = self.config.trip_days(request)?;
        info!(
            "Generating {}-day itinerary for {} ({} hotels, {} tours, {} attractions)",
            num_days,
            request.city,
            pools.hotels.len(),
            pools.tours.len(),
            pools.attractions.len()
        );
        let days = self.allocate_days(request.start_date, num_days, pools);
        Ok(Itinerary::new(request.meta(), days))
    }

    /// Builds `num_days` day plans starting at `start_date`. Callers must
    /// have rejected empty or reversed date ranges already.
    pub fn allocate_days(
        &mut self,
        start_date: NaiveDate,
        num_days: u32,
        pools: &VenuePools,
    ) -> Vec<DayPlan> {
        let policy = self.config.exhaustion_policy;
        let mut tours = PoolScanner::new(
            &pools.tours,
            self.config.max_tours_per_day,
            policy,
            &mut self.rng,
        );
        let mut attractions = PoolScanner::new(
            &pools.attractions,
            self.config.max_attractions_per_day,
            policy,
            &mut self.rng,
        );

        let mut days = Vec::with_capacity(num_days as usize);
        for i in 0..num_days {
            let mut notes = Vec::new();

            let (today_tours, tour_note) = tours.next_day();
            let (today_attractions, attraction_note) = attractions.next_day();
            let today_tours: Vec<Tour> = today_tours.into_iter().cloned().collect();
            let today_attractions: Vec<Attraction> =
                today_attractions.into_iter().cloned().collect();

            let choice = closest_hotel(&pools.hotels, &today_attractions);

            if let Some(reason) = choice.note {
                notes.push(DayNote::new(Category::Hotel, reason));
            }
            if let Some(reason) = tour_note {
                notes.push(DayNote::new(Category::Tour, reason));
            }
            if let Some(reason) = attraction_note {
                notes.push(DayNote::new(Category::Attraction, reason));
            }

            debug!(
                "Day {}: hotel={:?}, {} tours, {} attractions",
                i + 1,
                choice.hotel.map(|h| h.identity()),
                today_tours.len(),
                today_attractions.len()
            );

            days.push(DayPlan {
                day_index: i + 1,
                date: start_date + Duration::days(i as i64),
                hotel: choice.hotel.cloned(),
                tours: today_tours,
                attractions: today_attractions,
                notes,
            });
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hotel;

    fn tours(n: usize) -> Vec<Tour> {
        (0..n)
            .map(|i| Tour {
                title: Some(format!("Tour {}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn attractions(n: usize) -> Vec<Attraction> {
        (0..n)
            .map(|i| Attraction {
                placename: Some(format!("Attraction {}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    fn generator(policy: ExhaustionPolicy, seed: u64) -> ItineraryGenerator<StdRng> {
        let config = ItineraryGenerationConfig {
            exhaustion_policy: policy,
            ..Default::default()
        };
        ItineraryGenerator::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn tour_names(day: &DayPlan) -> Vec<String> {
        day.tours.iter().map(|t| t.identity().to_string()).collect()
    }

    #[test]
    fn test_days_and_dates() {
        let pools = VenuePools::default();
        let days = generator(ExhaustionPolicy::NoRepeat, 1).allocate_days(start(), 3, &pools);

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].day_index, 1);
        assert_eq!(days[2].day_index, 3);
        assert_eq!(days[0].date.to_string(), "2025-04-20");
        assert_eq!(days[2].date.to_string(), "2025-04-22");
    }

    #[test]
    fn test_large_pool_has_no_repeats() {
        for seed in 0..20 {
            let pools = VenuePools {
                tours: tours(11),
                attractions: attractions(10),
                ..Default::default()
            };
            let days = generator(ExhaustionPolicy::NoRepeat, seed).allocate_days(start(), 5, &pools);

            let mut seen = HashSet::new();
            for day in &days {
                assert_eq!(day.tours.len(), 2);
                assert_eq!(day.attractions.len(), 2);
                for tour in &day.tours {
                    assert!(seen.insert(tour.identity().to_string()));
                }
                assert!(day.notes.iter().all(|n| n.category == Category::Hotel));
            }
        }
    }

    #[test]
    fn test_no_repeat_under_fills_after_exhaustion() {
        let pools = VenuePools {
            tours: tours(1),
            ..Default::default()
        };
        let days = generator(ExhaustionPolicy::NoRepeat, 7).allocate_days(start(), 3, &pools);

        assert_eq!(tour_names(&days[0]), vec!["Tour 0"]);
        assert!(days[1].tours.is_empty());
        assert!(days[2].tours.is_empty());
        assert!(days[2]
            .notes
            .contains(&DayNote::new(Category::Tour, Degradation::PoolExhausted)));
    }

    #[test]
    fn test_wrap_around_repeats_only_after_full_cycle() {
        for seed in 0..20 {
            let pools = VenuePools {
                tours: tours(3),
                ..Default::default()
            };
            let days = generator(ExhaustionPolicy::WrapAround, seed).allocate_days(start(), 3, &pools);

            let sequence: Vec<String> = days.iter().flat_map(tour_names).collect();
            assert_eq!(sequence.len(), 6);
            let first_cycle: HashSet<&String> = sequence[..3].iter().collect();
            assert_eq!(first_cycle.len(), 3, "seed {}: {:?}", seed, sequence);

            for day in &days {
                let names = tour_names(day);
                assert_eq!(names.len(), 2);
                assert_ne!(names[0], names[1]);
                assert!(!day.notes.iter().any(|n| n.category == Category::Tour));
            }
        }
    }

    #[test]
    fn test_wrap_around_spreads_repeats_evenly() {
        for (pool_size, num_days) in [(3, 6), (5, 7), (4, 9)] {
            for seed in 0..20 {
                let pools = VenuePools {
                    tours: tours(pool_size),
                    ..Default::default()
                };
                let days = generator(ExhaustionPolicy::WrapAround, seed)
                    .allocate_days(start(), num_days, &pools);

                let mut counts = std::collections::HashMap::new();
                for day in &days {
                    let names = tour_names(day);
                    assert_eq!(names.len(), 2);
                    assert_ne!(names[0], names[1]);
                    for name in names {
                        *counts.entry(name).or_insert(0) += 1;
                    }
                }
                assert_eq!(counts.len(), pool_size);
                let most = counts.values().max().unwrap();
                let least = counts.values().min().unwrap();
                assert!(
                    most - least <= 1,
                    "pool {} seed {}: {:?}",
                    pool_size,
                    seed,
                    counts
                );
            }
        }
    }

    #[test]
    fn test_wrap_around_single_item_pool() {
        let pools = VenuePools {
            tours: tours(1),
            ..Default::default()
        };
        let days = generator(ExhaustionPolicy::WrapAround, 3).allocate_days(start(), 3, &pools);
        for day in &days {
            assert_eq!(tour_names(day), vec!["Tour 0"]);
        }
    }

    #[test]
    fn test_duplicate_identities_collapse() {
        let mut pool = tours(2);
        pool.push(Tour {
            title: Some("Tour 0".to_string()),
            url: Some("https://example.com/other".to_string()),
            ..Default::default()
        });
        let pools = VenuePools {
            tours: pool,
            ..Default::default()
        };
        let days = generator(ExhaustionPolicy::NoRepeat, 11).allocate_days(start(), 2, &pools);
        let total: usize = days.iter().map(|d| d.tours.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_same_seed_same_plan() {
        let pools = VenuePools {
            tours: tours(8),
            attractions: attractions(8),
            ..Default::default()
        };
        let a = generator(ExhaustionPolicy::NoRepeat, 42).allocate_days(start(), 4, &pools);
        let b = generator(ExhaustionPolicy::NoRepeat, 42).allocate_days(start(), 4, &pools);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_hotels_are_noted() {
        let pools = VenuePools {
            attractions: attractions(2),
            ..Default::default()
        };
        let days = generator(ExhaustionPolicy::NoRepeat, 5).allocate_days(start(), 1, &pools);
        assert_eq!(days[0].hotel, None);
        assert!(days[0]
            .notes
            .contains(&DayNote::new(Category::Hotel, Degradation::EmptyPool)));
    }

    #[test]
    fn test_hotel_without_attractions_is_first() {
        let pools = VenuePools {
            hotels: vec![
                Hotel {
                    name: Some("Lobby".to_string()),
                    ..Default::default()
                },
                Hotel {
                    name: Some("Annex".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let days = generator(ExhaustionPolicy::NoRepeat, 5).allocate_days(start(), 2, &pools);
        for day in &days {
            assert_eq!(day.hotel.as_ref().unwrap().identity(), "Lobby");
        }
    }

    fn request(start_date: &str, end_date: &str) -> ItineraryRequest {
        serde_json::from_value(serde_json::json!({
            "city": "New York",
            "start_date": start_date,
            "end_date": end_date,
        }))
        .unwrap()
    }

    #[test]
    fn test_trip_length_is_bounded() {
        let mut generator = generator(ExhaustionPolicy::NoRepeat, 1);
        let pools = VenuePools::default();

        let itinerary = generator
            .generate(&request("2025-04-20", "2025-06-18"), &pools)
            .unwrap();
        assert_eq!(itinerary.days.len(), 60);

        let err = generator
            .generate(&request("2025-04-20", "2025-06-19"), &pools)
            .unwrap_err();
        assert!(matches!(err, PlannerError::TripTooLong { days: 61, max: 60 }));

        let err = generator
            .generate(&request("0001-01-01", "9999-12-31"), &pools)
            .unwrap_err();
        assert!(matches!(err, PlannerError::TripTooLong { .. }));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("wrap".parse(), Ok(ExhaustionPolicy::WrapAround));
        assert_eq!("No-Repeat".parse(), Ok(ExhaustionPolicy::NoRepeat));
        assert!("sometimes".parse::<ExhaustionPolicy>().is_err());
    }
}
