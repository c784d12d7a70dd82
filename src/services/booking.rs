//! Booking service: slot state transition plus receipt persistence.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::api::{ClockTime, ProviderId, SlotStatus};
use crate::db::models::{BookingRecord, ScheduleSnapshot};
use crate::db::repository::{FullRepository, RepositoryResult};

use super::registry::ScheduleRegistry;

/// Result of a booking attempt.
///
/// `SlotNotFound` and `AlreadyBooked` are soft outcomes: the schedule is
/// untouched and callers re-render from the latest state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    Confirmed { booking: BookingRecord },
    AlreadyBooked,
    SlotNotFound,
}

impl BookingOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingOutcome::Confirmed { .. })
    }
}

/// Book the slot identified by `(date, time_label)` for a provider.
///
/// The status check, the Available -> Booked transition, and the snapshot
/// persist all happen under the provider's engine lock, so two concurrent
/// requests for the same slot resolve to exactly one `Confirmed` and one
/// `AlreadyBooked`.
pub async fn book_slot<R: FullRepository + ?Sized>(
    repo: &R,
    registry: &ScheduleRegistry,
    provider_id: &ProviderId,
    date: NaiveDate,
    time_label: &str,
    patient_id: Option<String>,
) -> RepositoryResult<BookingOutcome> {
    // Canonicalize the label up front; an unparseable label can never match
    // a generated slot.
    let Some(time) = ClockTime::parse_label(time_label) else {
        return Ok(BookingOutcome::SlotNotFound);
    };
    let label = time.label();

    let handle = registry.engine_for(provider_id);
    let mut engine = handle.lock().await;

    match engine.slot_status(date, &label) {
        None | Some(SlotStatus::Unavailable) => Ok(BookingOutcome::SlotNotFound),
        Some(SlotStatus::Booked) => Ok(BookingOutcome::AlreadyBooked),
        Some(SlotStatus::Available) => {
            // Stage the transition on a copy and only commit to the live
            // engine once both writes landed, so a storage failure leaves
            // the slot open.
            let mut updated = engine.clone();
            updated.book_slot(date, &label);
            let snapshot = ScheduleSnapshot::capture(provider_id.clone(), &updated);
            let record =
                BookingRecord::new(provider_id.clone(), date, label.as_str(), patient_id);

            repo.store_snapshot(&snapshot).await?;
            repo.record_booking(&record).await?;
            *engine = updated;
            info!(
                "booked {} {} for provider {} (booking {})",
                date, label, provider_id, record.booking_id
            );
            Ok(BookingOutcome::Confirmed { booking: record })
        }
    }
}

/// All booking receipts for one provider, oldest first.
pub async fn list_bookings<R: FullRepository + ?Sized>(
    repo: &R,
    provider_id: &ProviderId,
) -> RepositoryResult<Vec<BookingRecord>> {
    repo.bookings_for_provider(provider_id).await
}
