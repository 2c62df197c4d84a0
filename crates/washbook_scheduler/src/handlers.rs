// File: crates/washbook_scheduler/src/handlers.rs
use crate::catalog::ServiceCatalog;
use crate::logic::{
    AvailabilityQuery, AvailabilityResponse, BookingConfirmation, BookingRejectedResponse,
    BookingRequest, BookingSummary, BookingsResponse, ServicesResponse,
};
use crate::models::BookingRejection;
use crate::service::Scheduler;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono_tz::Tz;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use washbook_common::{config_error, map_json_error, Clock, SystemClock, WashbookError};
use washbook_config::AppConfig;

// Shared state needed by the scheduler handlers
#[derive(Clone)]
pub struct SchedulerState {
    pub scheduler: Arc<Scheduler>,
    pub clock: Arc<dyn Clock>,
    /// Zone used for datetimes submitted without an offset.
    pub time_zone: Tz,
}

impl SchedulerState {
    pub fn new(scheduler: Arc<Scheduler>, clock: Arc<dyn Clock>, time_zone: Tz) -> Self {
        Self {
            scheduler,
            clock,
            time_zone,
        }
    }

    /// Builds an empty in-memory scheduler from configuration, on the system clock.
    pub fn from_config(config: &AppConfig) -> Result<Self, WashbookError> {
        let time_zone = Tz::from_str(&config.scheduler.time_zone).map_err(|_| {
            config_error(format!("unknown time zone: {}", config.scheduler.time_zone))
        })?;
        let catalog = ServiceCatalog::from_config(&config.scheduler);
        info!(
            "Scheduler configured with {} service(s), default duration {} min, zone {}",
            catalog.services().len(),
            catalog.default_duration_minutes(),
            time_zone
        );

        Ok(Self::new(
            Arc::new(Scheduler::in_memory(catalog)),
            Arc::new(SystemClock),
            time_zone,
        ))
    }
}

/// Handler to check whether a start time is bookable.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/check-availability", // Path relative to /api
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability with alternatives on conflict", body = AvailabilityResponse),
        (status = 400, description = "Missing or malformed datetime/service")
    ),
    tag = "Scheduler"
))]
pub async fn check_availability_handler(
    State(state): State<Arc<SchedulerState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, Response> {
    let Query(query) = query.map_err(|rejection| {
        info!("Rejected malformed availability query: {}", rejection);
        WashbookError::ParseError(rejection.body_text()).into_response()
    })?;

    let result = query.parse(state.time_zone).map(|(start, service)| {
        let availability = state
            .scheduler
            .check_availability(start, &service, state.clock.now());
        AvailabilityResponse::from(&availability)
    });

    map_json_error(result, WashbookError::from)
}

/// Handler to commit a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings", // Path relative to /api
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking committed", body = BookingConfirmation),
        (status = 400, description = "Missing fields, malformed datetime, or start in the past", body = BookingRejectedResponse),
        (status = 409, description = "Slot taken; alternatives suggested", body = BookingRejectedResponse)
    ),
    tag = "Scheduler"
))]
pub async fn book_appointment_handler(
    State(state): State<Arc<SchedulerState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        // no JSON body at all: every required field is missing
        Err(JsonRejection::MissingJsonContentType(_)) => BookingRequest::default(),
        Err(rejection) => {
            info!("Rejected unreadable booking body: {}", rejection);
            return WashbookError::ParseError(rejection.body_text()).into_response();
        }
    };

    let request = match payload.into_new_appointment(state.time_zone) {
        Ok(request) => request,
        Err(err) => {
            info!("Rejected malformed booking request: {}", err);
            return WashbookError::from(err).into_response();
        }
    };

    match state.scheduler.commit(request, state.clock.now()) {
        Ok(appointment) => {
            let booking = BookingSummary::from_appointment(&appointment, state.scheduler.catalog());
            let confirmation = BookingConfirmation {
                success: true,
                id: appointment.id.clone(),
                message: "Booking confirmed successfully".to_string(),
                duration_minutes: booking.duration_minutes,
                booking,
            };
            (StatusCode::CREATED, Json(confirmation)).into_response()
        }
        Err(rejection) => {
            let status = match rejection {
                BookingRejection::PastTime => StatusCode::BAD_REQUEST,
                BookingRejection::Conflict { .. } => StatusCode::CONFLICT,
            };
            (status, Json(BookingRejectedResponse::from(&rejection))).into_response()
        }
    }
}

/// Handler to list committed bookings (operator view).
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings", // Path relative to /api
    responses(
        (status = 200, description = "All committed bookings in insertion order", body = BookingsResponse)
    ),
    tag = "Scheduler"
))]
pub async fn list_bookings_handler(
    State(state): State<Arc<SchedulerState>>,
) -> Json<BookingsResponse> {
    let catalog = state.scheduler.catalog();
    let bookings: Vec<BookingSummary> = state
        .scheduler
        .list()
        .iter()
        .map(|appointment| BookingSummary::from_appointment(appointment, catalog))
        .collect();

    Json(BookingsResponse {
        count: bookings.len(),
        bookings,
    })
}

/// Handler to list the service catalog.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/services", // Path relative to /api
    responses(
        (status = 200, description = "Bookable services and their durations", body = ServicesResponse)
    ),
    tag = "Scheduler"
))]
pub async fn list_services_handler(
    State(state): State<Arc<SchedulerState>>,
) -> Json<ServicesResponse> {
    Json(ServicesResponse::from(state.scheduler.catalog()))
}
