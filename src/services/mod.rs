//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository layer and whatever consumes the
//! crate (the HTTP API, tests, embedding applications). They own the
//! per-provider locking discipline and the persistence flow around the
//! schedule engine.

pub mod agenda;
pub mod booking;
pub mod registry;
pub mod schedule;

pub use agenda::{calendar_availability, day_slots, DayAvailability};
pub use booking::{book_slot, list_bookings, BookingOutcome};
pub use registry::ScheduleRegistry;
pub use schedule::{
    ensure_restored, get_schedule, health_check, list_providers, publish_schedule,
    restore_schedule,
};
