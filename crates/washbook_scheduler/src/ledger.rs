// --- File: crates/washbook_scheduler/src/ledger.rs ---
//! Storage for committed appointments.
//!
//! The scheduler owns a [`Ledger`] behind its commit lock; implementations do
//! not need their own synchronisation. Appointments are only ever appended.

use crate::models::Appointment;

/// Insertion-ordered, append-only collection of committed appointments.
#[cfg_attr(test, mockall::automock)]
pub trait Ledger: Send {
    /// All committed appointments in insertion order.
    fn list(&self) -> Vec<Appointment>;

    /// Appends `appointment` and returns the stored value.
    fn append(&mut self, appointment: Appointment) -> Appointment;
}

/// Process-lifetime ledger backed by a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    appointments: Vec<Appointment>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

impl Ledger for InMemoryLedger {
    fn list(&self) -> Vec<Appointment> {
        self.appointments.clone()
    }

    fn append(&mut self, appointment: Appointment) -> Appointment {
        self.appointments.push(appointment.clone());
        appointment
    }
}
