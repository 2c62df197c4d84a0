// --- File: crates/washbook_scheduler/src/routes.rs ---

use crate::handlers::{
    book_appointment_handler, check_availability_handler, list_bookings_handler,
    list_services_handler, SchedulerState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use washbook_common::WashbookError;
use washbook_config::AppConfig;

/// Router for the scheduler endpoints, to be nested under `/api`.
pub fn routes(state: Arc<SchedulerState>) -> Router {
    Router::new()
        .route("/check-availability", get(check_availability_handler))
        .route(
            "/bookings",
            post(book_appointment_handler).get(list_bookings_handler),
        )
        .route("/services", get(list_services_handler))
        .with_state(state)
}

/// Builds the scheduler state from `config` and returns its router.
pub fn routes_from_config(config: &AppConfig) -> Result<Router, WashbookError> {
    let state = SchedulerState::from_config(config)?;
    Ok(routes(Arc::new(state)))
}
