use serde::{Deserialize, Serialize};
use std::fmt;

use super::venue::Category;

/// Why an output is lower fidelity than asked for. These accompany valid
/// results; they are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    UnknownCity,
    UnparseableDistance,
    EmptyPool,
    MissingCoordinates,
    PoolExhausted,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Degradation::UnknownCity => "unknown city",
            Degradation::UnparseableDistance => "unparseable distance",
            Degradation::EmptyPool => "empty pool",
            Degradation::MissingCoordinates => "missing coordinates",
            Degradation::PoolExhausted => "pool exhausted",
        };
        f.write_str(text)
    }
}

/// A degradation attached to one category of a day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNote {
    pub category: Category,
    pub reason: Degradation,
}

impl DayNote {
    pub fn new(category: Category, reason: Degradation) -> Self {
        Self { category, reason }
    }
}
