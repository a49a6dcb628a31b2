use std::path::PathBuf;

use crate::models::BudgetTier;
use crate::services::alternatives_service::DEFAULT_MAX_ALTERNATIVES;
use crate::services::itinerary_generation_service::{
    ExhaustionPolicy, ItineraryGenerationConfig, MAX_ATTRACTIONS_PER_DAY, MAX_TOURS_PER_DAY,
    MAX_TRIP_DAYS,
};

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;

/// Highest price per tier a venue may quote. Prices are compared in the
/// currency they are listed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetLimits {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            low_max: 150.0,
            medium_max: 300.0,
        }
    }
}

impl BudgetLimits {
    /// `None` means the tier has no ceiling.
    pub fn ceiling(&self, tier: BudgetTier) -> Option<f64> {
        match tier {
            BudgetTier::Low => Some(self.low_max),
            BudgetTier::Medium => Some(self.medium_max),
            BudgetTier::High => None,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            low_max: std::env::var("BUDGET_LOW_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.low_max),
            medium_max: std::env::var("BUDGET_MEDIUM_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.medium_max),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// JSON venue catalog keyed by city.
    pub catalog_path: Option<PathBuf>,
    /// Geocoded hotel CSV merged into the catalog's hotel pools.
    pub geocoded_hotels_path: Option<PathBuf>,
    pub generation: ItineraryGenerationConfig,
    pub max_alternatives: usize,
    pub budget: BudgetLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            catalog_path: None,
            geocoded_hotels_path: None,
            generation: ItineraryGenerationConfig::default(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            budget: BudgetLimits::default(),
        }
    }
}

impl AppConfig {
    /// Reads every setting from the environment, keeping the default for
    /// any variable that is missing or does not parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            catalog_path: std::env::var("VENUE_CATALOG_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            geocoded_hotels_path: std::env::var("GEOCODED_HOTELS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            generation: ItineraryGenerationConfig {
                max_tours_per_day: std::env::var("MAX_TOURS_PER_DAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(MAX_TOURS_PER_DAY),
                max_attractions_per_day: std::env::var("MAX_ATTRACTIONS_PER_DAY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(MAX_ATTRACTIONS_PER_DAY),
                exhaustion_policy: std::env::var("EXHAUSTION_POLICY")
                    .ok()
                    .and_then(|s| s.parse::<ExhaustionPolicy>().ok())
                    .unwrap_or_default(),
                max_trip_days: std::env::var("MAX_TRIP_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|&days: &u32| days > 0)
                    .unwrap_or(MAX_TRIP_DAYS),
            },
            max_alternatives: std::env::var("MAX_ALTERNATIVES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_alternatives),
            budget: BudgetLimits::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_ceilings() {
        let limits = BudgetLimits::default();
        assert_eq!(limits.ceiling(BudgetTier::Low), Some(150.0));
        assert_eq!(limits.ceiling(BudgetTier::Medium), Some(300.0));
        assert_eq!(limits.ceiling(BudgetTier::High), None);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_alternatives, 2);
        assert_eq!(config.generation.max_tours_per_day, 2);
        assert_eq!(config.generation.max_trip_days, 60);
        assert_eq!(
            config.generation.exhaustion_policy,
            ExhaustionPolicy::NoRepeat
        );
    }
}
