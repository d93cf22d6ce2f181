//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in fleetdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Seed dataset loaded into the store
    SeedLoaded,
    /// Seed dataset could not be loaded (FATAL)
    SeedFailed,
    /// Listening for requests
    Serving,
    /// Server stopped
    ShutdownComplete,

    // Requests
    /// HTTP request finished
    RequestComplete,
    /// Request failed with a server-side error
    RequestFailed,

    // Store mutations
    /// Vehicle inserted
    VehicleCreated,
    /// Vehicle fuel type or attributes changed
    VehicleUpdated,
    /// Vehicle removed
    VehicleDeleted,
    /// Batch creation stopped at a failing record
    BatchAborted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "FLEETDB_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SeedLoaded => "SEED_LOADED",
            Event::SeedFailed => "SEED_FAILED",
            Event::Serving => "FLEETDB_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RequestComplete => "REQUEST_COMPLETE",
            Event::RequestFailed => "REQUEST_FAILED",

            Event::VehicleCreated => "VEHICLE_CREATED",
            Event::VehicleUpdated => "VEHICLE_UPDATED",
            Event::VehicleDeleted => "VEHICLE_DELETED",
            Event::BatchAborted => "BATCH_ABORTED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::SeedFailed)
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RequestFailed | Event::BatchAborted)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
