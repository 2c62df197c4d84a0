// File: crates/washbook_scheduler/src/doc.rs
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityQuery, AvailabilityResponse, BookingConfirmation, BookingRejectedResponse,
    BookingRequest, BookingSummary, BookingsResponse, ServiceSummary, ServicesResponse,
};
use crate::models::RejectionReason;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::check_availability_handler,
        crate::handlers::book_appointment_handler,
        crate::handlers::list_bookings_handler,
        crate::handlers::list_services_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailabilityResponse,
            BookingRequest,
            BookingConfirmation,
            BookingRejectedResponse,
            BookingSummary,
            BookingsResponse,
            RejectionReason,
            ServiceSummary,
            ServicesResponse
        )
    ),
    tags(
        (name = "Scheduler", description = "Availability checks and bookings for the wash bay")
    ),
    servers(
        (url = "/api", description = "Washbook API server")
    )
)]
pub struct SchedulerApiDoc;
