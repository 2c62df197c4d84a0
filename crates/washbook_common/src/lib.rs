// --- File: crates/washbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{config_error, Context, HttpStatusCode, WashbookError};

// Re-export HTTP utilities for easier access
pub use http::{map_json_error, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

pub use services::{Clock, FixedClock, SystemClock};

// This crate provides functionality shared by the scheduler and the backend binary:
// error handling, HTTP error rendering, logging setup and the clock abstraction.
