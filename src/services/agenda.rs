//! Read-side services for the calendar display.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{ProviderId, ScheduleRange, TimeSlot};

use super::registry::ScheduleRegistry;

/// One calendar cell: does the provider work that day at all?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available: bool,
}

/// Availability flag for every day in the window, in date order.
///
/// A day reads as available when it has working hours, even if every slot
/// in it is already booked; the day view is where slot-level state shows.
pub async fn calendar_availability(
    registry: &ScheduleRegistry,
    provider_id: &ProviderId,
    window: &ScheduleRange,
) -> Vec<DayAvailability> {
    let handle = registry.engine_for(provider_id);
    let engine = handle.lock().await;

    window
        .days()
        .map(|date| DayAvailability {
            date,
            available: engine.is_available(date),
        })
        .collect()
}

/// The provider's slots for one day, chronological; empty when the day has
/// no working hours.
pub async fn day_slots(
    registry: &ScheduleRegistry,
    provider_id: &ProviderId,
    date: NaiveDate,
) -> Vec<TimeSlot> {
    let handle = registry.engine_for(provider_id);
    let engine = handle.lock().await;
    engine.slots_for(date).to_vec()
}
