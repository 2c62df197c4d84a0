// --- File: crates/washbook_scheduler/src/lib.rs ---
// Declare modules within this crate
pub mod catalog;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod ledger;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod routes;
pub mod service;

pub use catalog::{ServiceCatalog, ServiceType};
pub use handlers::SchedulerState;
pub use ledger::{InMemoryLedger, Ledger};
pub use models::{
    Appointment, Availability, BookingRejection, CustomerDetails, NewAppointment,
    RejectionReason, TimeInterval, ValidationError,
};
pub use routes::routes;
pub use service::Scheduler;
