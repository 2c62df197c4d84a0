// --- File: crates/washbook_scheduler/src/models.rs ---

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use washbook_common::WashbookError;

/// Half-open time range `[start, end)` occupied by one appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// `end` saturates at the latest representable instant.
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start,
            end: start
                .checked_add_signed(duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Touching endpoints (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Customer metadata carried with a booking. Only presence is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub notes: Option<String>,
}

/// A validated booking request, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub start: DateTime<Utc>,
    pub service: String,
    pub customer: CustomerDetails,
}

/// A committed appointment. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub id: String,
    pub start: DateTime<Utc>,
    pub service: String,
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectionReason {
    Past,
    Conflict,
}

/// Why a start time cannot be booked. Shared by the availability check and commit paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    #[error("Selected time is in the past")]
    PastTime,
    #[error("Time slot not available")]
    Conflict { suggested_times: Vec<DateTime<Utc>> },
}

impl BookingRejection {
    pub fn reason(&self) -> RejectionReason {
        match self {
            BookingRejection::PastTime => RejectionReason::Past,
            BookingRejection::Conflict { .. } => RejectionReason::Conflict,
        }
    }

    /// Alternatives near the request; always empty for past times.
    pub fn suggested_times(&self) -> &[DateTime<Utc>] {
        match self {
            BookingRejection::PastTime => &[],
            BookingRejection::Conflict { suggested_times } => suggested_times,
        }
    }
}

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(BookingRejection),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn message(&self) -> String {
        match self {
            Availability::Available => "Time slot is available".to_string(),
            Availability::Unavailable(rejection) => rejection.to_string(),
        }
    }

    pub fn suggested_times(&self) -> &[DateTime<Utc>] {
        match self {
            Availability::Available => &[],
            Availability::Unavailable(rejection) => rejection.suggested_times(),
        }
    }
}

/// Request data rejected before any scheduling logic runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("invalid datetime '{0}', expected ISO-8601 (e.g. 2025-06-01T10:00:00Z)")]
    InvalidDateTime(String),
}

impl From<ValidationError> for WashbookError {
    fn from(err: ValidationError) -> Self {
        WashbookError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rejection_shapes() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
        let conflict = BookingRejection::Conflict {
            suggested_times: vec![at],
        };
        assert_eq!(conflict.reason(), RejectionReason::Conflict);
        assert_eq!(conflict.suggested_times(), &[at]);

        assert_eq!(BookingRejection::PastTime.reason(), RejectionReason::Past);
        assert!(BookingRejection::PastTime.suggested_times().is_empty());
    }

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::MissingFields(vec!["name", "phone"]);
        assert_eq!(err.to_string(), "missing required fields: name, phone");

        let wrapped: WashbookError = err.into();
        assert_eq!(
            wrapped.to_string(),
            "Validation error: missing required fields: name, phone"
        );
    }
}
