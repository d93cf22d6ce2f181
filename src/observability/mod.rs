//! Observability subsystem for fleetdb
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle events
//! - Request counters
//!
//! Observability is read-only: a failed log write never fails an operation.
//!
//! ```ignore
//! use fleetdb::observability::{Logger, Event, log_event_with_fields};
//!
//! Logger::info("SOMETHING_HAPPENED", &[("rows", "42")]);
//! log_event_with_fields(Event::VehicleDeleted, &[("id", "7")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
