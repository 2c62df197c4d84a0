// --- File: crates/washbook_scheduler/src/logic.rs ---
use crate::catalog::ServiceCatalog;
use crate::models::{
    Appointment, Availability, BookingRejection, CustomerDetails, NewAppointment,
    RejectionReason, TimeInterval, ValidationError,
};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on alternatives returned for a conflicting request.
pub const MAX_SUGGESTIONS: usize = 3;
/// Candidates are searched at whole-hour offsets `1..=MAX_SUGGESTION_OFFSET_HOURS`.
pub const MAX_SUGGESTION_OFFSET_HOURS: i64 = 3;

// --- Interval Logic ---

pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.overlaps(b)
}

pub fn interval_of(catalog: &ServiceCatalog, start: DateTime<Utc>, service: &str) -> TimeInterval {
    TimeInterval::new(start, catalog.duration_of(service))
}

/// Linear scan of `snapshot` for any appointment overlapping `candidate`.
pub fn has_conflict(
    catalog: &ServiceCatalog,
    candidate: &TimeInterval,
    snapshot: &[Appointment],
) -> bool {
    snapshot.iter().any(|existing| {
        let existing_interval = interval_of(catalog, existing.start, &existing.service);
        overlaps(candidate, &existing_interval)
    })
}

// --- Suggestion Logic ---

/// Candidate start times in search order: `+1h, -1h, +2h, -2h, +3h, -3h`.
///
/// Offsets that leave chrono's representable range are skipped.
pub fn candidate_starts(start: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
    (1..=MAX_SUGGESTION_OFFSET_HOURS).flat_map(move |hours| {
        let offset = Duration::hours(hours);
        [start.checked_add_signed(offset), start.checked_sub_signed(offset)]
            .into_iter()
            .flatten()
    })
}

/// Returns up to [`MAX_SUGGESTIONS`] start times near `start` that are after
/// `now` and free in `snapshot`, in candidate order.
pub fn suggest_alternatives(
    catalog: &ServiceCatalog,
    start: DateTime<Utc>,
    service: &str,
    now: DateTime<Utc>,
    snapshot: &[Appointment],
) -> Vec<DateTime<Utc>> {
    let duration = catalog.duration_of(service);
    let suggestions: Vec<_> = candidate_starts(start)
        .filter(|candidate| *candidate > now)
        .filter(|candidate| {
            let interval = TimeInterval::new(*candidate, duration);
            !has_conflict(catalog, &interval, snapshot)
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    debug!(
        "Suggested {} alternative(s) for {} at {}",
        suggestions.len(),
        service,
        start
    );
    suggestions
}

/// Decides whether `service` can start at `start` given `snapshot`.
///
/// Past requests are rejected without suggestions; conflicts carry
/// suggestions computed against the same snapshot.
pub fn check_availability(
    catalog: &ServiceCatalog,
    start: DateTime<Utc>,
    service: &str,
    now: DateTime<Utc>,
    snapshot: &[Appointment],
) -> Availability {
    if start <= now {
        return Availability::Unavailable(BookingRejection::PastTime);
    }

    let candidate = interval_of(catalog, start, service);
    if !has_conflict(catalog, &candidate, snapshot) {
        return Availability::Available;
    }

    Availability::Unavailable(BookingRejection::Conflict {
        suggested_times: suggest_alternatives(catalog, start, service, now, snapshot),
    })
}

// --- Request Parsing ---

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
/// Accepted calendar years; `%Y` alone would take expanded years like `+262142`.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parses an ISO-8601 start time.
///
/// Values with an offset (`Z`, `+02:00`) are taken as-is. Zone-less values,
/// as sent by `datetime-local` inputs, are read in `time_zone`.
pub fn parse_start(raw: &str, time_zone: Tz) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(with_offset) => Some(with_offset.with_timezone(&Utc)),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            // earliest(): ambiguous local times (DST fold) take the first instant
            .and_then(|naive| time_zone.from_local_datetime(&naive).earliest())
            .map(|local| local.with_timezone(&Utc)),
    };

    parsed
        .filter(|start| SUPPORTED_YEARS.contains(&start.year()))
        .ok_or_else(|| ValidationError::InvalidDateTime(raw.to_string()))
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Requested start, ISO-8601
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-01T10:00:00Z"))]
    pub datetime: Option<String>,
    /// Service name from the catalog
    #[cfg_attr(feature = "openapi", schema(example = "Basic Wash"))]
    pub service: Option<String>,
}

impl AvailabilityQuery {
    pub fn parse(&self, time_zone: Tz) -> Result<(DateTime<Utc>, String), ValidationError> {
        match (present(&self.datetime), present(&self.service)) {
            (Some(datetime), Some(service)) => {
                Ok((parse_start(datetime, time_zone)?, service.to_string()))
            }
            (datetime, service) => {
                let mut missing = Vec::new();
                if datetime.is_none() {
                    missing.push("datetime");
                }
                if service.is_none() {
                    missing.push("service");
                }
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[cfg_attr(feature = "openapi", schema(example = json!(["2025-06-01T11:00:00Z"])))]
    pub suggested_times: Vec<String>,
}

impl From<&Availability> for AvailabilityResponse {
    fn from(availability: &Availability) -> Self {
        let reason = match availability {
            Availability::Available => None,
            Availability::Unavailable(rejection) => Some(rejection.reason()),
        };
        Self {
            available: availability.is_available(),
            message: availability.message(),
            reason,
            suggested_times: availability
                .suggested_times()
                .iter()
                .copied()
                .map(format_timestamp)
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "+41 79 123 45 67"))]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Bahnhofstrasse 1, Zurich"))]
    pub address: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Interior Clean"))]
    pub service: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-01T10:00:00Z"))]
    pub datetime: Option<String>,
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Checks required fields and parses the start time.
    pub fn into_new_appointment(self, time_zone: Tz) -> Result<NewAppointment, ValidationError> {
        let required = [
            ("name", present(&self.name)),
            ("phone", present(&self.phone)),
            ("address", present(&self.address)),
            ("service", present(&self.service)),
            ("datetime", present(&self.datetime)),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let start = parse_start(present(&self.datetime).unwrap_or_default(), time_zone)?;
        let service = present(&self.service).unwrap_or_default().to_string();
        let customer = CustomerDetails {
            name: present(&self.name).unwrap_or_default().to_string(),
            phone: present(&self.phone).unwrap_or_default().to_string(),
            email: present(&self.email).map(str::to_string),
            address: present(&self.address).unwrap_or_default().to_string(),
            notes: present(&self.notes).map(str::to_string),
        };

        Ok(NewAppointment {
            start,
            service,
            customer,
        })
    }
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    #[cfg_attr(feature = "openapi", schema(example = "BK-3F2A9C0E41B84D7A9E4C1D2B3A4F5E6D"))]
    pub id: String,
    pub service: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-01T10:00:00Z"))]
    pub datetime: String,
    pub duration_minutes: u32,
    pub created_at: String,
}

impl BookingSummary {
    pub fn from_appointment(appointment: &Appointment, catalog: &ServiceCatalog) -> Self {
        Self {
            id: appointment.id.clone(),
            service: appointment.service.clone(),
            datetime: format_timestamp(appointment.start),
            duration_minutes: catalog.duration_minutes_of(&appointment.service),
            created_at: format_timestamp(appointment.created_at),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub id: String,
    pub message: String,
    pub duration_minutes: u32,
    pub booking: BookingSummary,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRejectedResponse {
    pub success: bool,
    pub reason: RejectionReason,
    pub message: String,
    pub suggested_times: Vec<String>,
}

impl From<&BookingRejection> for BookingRejectedResponse {
    fn from(rejection: &BookingRejection) -> Self {
        Self {
            success: false,
            reason: rejection.reason(),
            message: rejection.to_string(),
            suggested_times: rejection
                .suggested_times()
                .iter()
                .copied()
                .map(format_timestamp)
                .collect(),
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingsResponse {
    pub count: usize,
    pub bookings: Vec<BookingSummary>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub name: String,
    pub duration_minutes: u32,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub services: Vec<ServiceSummary>,
    pub default_duration_minutes: u32,
}

impl From<&ServiceCatalog> for ServicesResponse {
    fn from(catalog: &ServiceCatalog) -> Self {
        Self {
            services: catalog
                .services()
                .iter()
                .map(|service| ServiceSummary {
                    name: service.name.clone(),
                    duration_minutes: service.duration_minutes,
                })
                .collect(),
            default_duration_minutes: catalog.default_duration_minutes(),
        }
    }
}
