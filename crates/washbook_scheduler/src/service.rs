// --- File: crates/washbook_scheduler/src/service.rs ---
//! The scheduler: availability checks and atomic commits over a [`Ledger`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::ServiceCatalog;
use crate::ledger::{InMemoryLedger, Ledger};
use crate::logic;
use crate::models::{Appointment, Availability, BookingRejection, NewAppointment, TimeInterval};

/// Single-resource scheduler.
///
/// Every ledger access goes through one mutex. `commit` holds it across the
/// conflict re-check and the append, so two overlapping commits can never
/// both succeed.
pub struct Scheduler<L: Ledger = InMemoryLedger> {
    catalog: ServiceCatalog,
    ledger: Mutex<L>,
}

impl Scheduler<InMemoryLedger> {
    /// A scheduler over a fresh, empty in-memory ledger.
    pub fn in_memory(catalog: ServiceCatalog) -> Self {
        Self::new(catalog, InMemoryLedger::new())
    }
}

impl<L: Ledger> Scheduler<L> {
    pub fn new(catalog: ServiceCatalog, ledger: L) -> Self {
        Self {
            catalog,
            ledger: Mutex::new(ledger),
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn duration_of(&self, service: &str) -> Duration {
        self.catalog.duration_of(service)
    }

    pub fn interval_of(&self, appointment: &Appointment) -> TimeInterval {
        logic::interval_of(&self.catalog, appointment.start, &appointment.service)
    }

    /// True iff `service` starting at `start` overlaps anything in `snapshot`.
    pub fn has_conflict(
        &self,
        start: DateTime<Utc>,
        service: &str,
        snapshot: &[Appointment],
    ) -> bool {
        let candidate = logic::interval_of(&self.catalog, start, service);
        logic::has_conflict(&self.catalog, &candidate, snapshot)
    }

    /// Read-only check against a consistent snapshot of the ledger.
    pub fn check_availability(
        &self,
        start: DateTime<Utc>,
        service: &str,
        now: DateTime<Utc>,
    ) -> Availability {
        let snapshot = self.list();
        let availability =
            logic::check_availability(&self.catalog, start, service, now, &snapshot);
        debug!("Availability for {} at {}: {:?}", service, start, availability);
        availability
    }

    pub fn suggest_alternatives(
        &self,
        start: DateTime<Utc>,
        service: &str,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let snapshot = self.list();
        logic::suggest_alternatives(&self.catalog, start, service, now, &snapshot)
    }

    /// Re-validates and stores `request` in one critical section.
    ///
    /// A rejection carries the same shape as [`Self::check_availability`],
    /// with suggestions computed against the pre-commit snapshot.
    pub fn commit(
        &self,
        request: NewAppointment,
        now: DateTime<Utc>,
    ) -> Result<Appointment, BookingRejection> {
        let mut ledger = self.lock();
        let snapshot = ledger.list();

        let availability = logic::check_availability(
            &self.catalog,
            request.start,
            &request.service,
            now,
            &snapshot,
        );
        if let Availability::Unavailable(rejection) = availability {
            warn!(
                "Rejected booking for {} at {}: {}",
                request.service, request.start, rejection
            );
            return Err(rejection);
        }

        let appointment = Appointment {
            id: next_booking_id(),
            start: request.start,
            service: request.service,
            customer: request.customer,
            created_at: now,
        };
        let stored = ledger.append(appointment);
        info!(
            "Booked {} for {} at {} ({} appointments in ledger)",
            stored.id,
            stored.service,
            stored.start,
            snapshot.len() + 1
        );
        Ok(stored)
    }

    /// All committed appointments, insertion order.
    pub fn list(&self) -> Vec<Appointment> {
        self.lock().list()
    }

    // Appends are all-or-nothing, so a poisoned ledger is still consistent.
    fn lock(&self) -> MutexGuard<'_, L> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Opaque unique booking id, e.g. `BK-3F2A9C0E41B84D7A9E4C1D2B3A4F5E6D`.
pub fn next_booking_id() -> String {
    format!("BK-{}", Uuid::new_v4().simple().to_string().to_uppercase())
}
