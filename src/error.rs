use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Failures that callers must handle. Degraded-but-valid output (unknown
/// city, unparseable distance, empty pools) is never reported through here,
/// see [`crate::models::Degradation`].
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("trip of {days} days exceeds the limit of {max} days")]
    TripTooLong { days: u32, max: u32 },
    #[error("invalid category: {0}")]
    UnknownCategory(String),
    #[error("invalid replacement key: {0}")]
    InvalidReplacementKey(String),
    #[error("replacement for {key} must be a {expected}, got a {found}")]
    CategoryMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    detail: String,
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::InvalidDateRange { .. } | PlannerError::TripTooLong { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PlannerError::UnknownCategory(_)
            | PlannerError::InvalidReplacementKey(_)
            | PlannerError::CategoryMismatch { .. } => StatusCode::BAD_REQUEST,
            PlannerError::Io(_) | PlannerError::Json(_) | PlannerError::Csv(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            detail: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        assert_eq!(
            PlannerError::InvalidDateRange { start, end }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PlannerError::TripTooLong { days: 400, max: 60 }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PlannerError::UnknownCategory("boat".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_date_range_message() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let err = PlannerError::InvalidDateRange { start, end };
        assert_eq!(
            err.to_string(),
            "end date 2025-04-20 is before start date 2025-04-25"
        );
    }
}
