//! Storage-facing data shapes.
//!
//! Schedules persist as a flat `{date -> [{time, status}]}` structure with
//! ISO-8601 day keys, which is the exact form the portal's key-value store
//! has always held. Everything here is plain serde data; conversion to and
//! from the live engine happens through `ScheduleSnapshot`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ClockTime, ProviderId, SlotStatus, TimeSlot};
use crate::scheduler::ScheduleEngine;

/// Persisted form of a single slot: display label plus status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Display label, e.g. "9:00 AM"
    pub time: String,
    /// Booking state, stored with capitalized names
    pub status: SlotStatus,
}

impl From<&TimeSlot> for SlotRecord {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            time: slot.label(),
            status: slot.status,
        }
    }
}

/// Durable form of one provider's full schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// Owning provider
    pub provider_id: ProviderId,
    /// When this snapshot was captured
    pub generated_at: DateTime<Utc>,
    /// ISO-8601 day -> chronological slot records
    pub days: BTreeMap<NaiveDate, Vec<SlotRecord>>,
    /// SHA-256 over the serialized day map, used for store deduplication
    pub checksum: String,
}

impl ScheduleSnapshot {
    /// Capture the engine's current state into its persisted form.
    pub fn capture(provider_id: ProviderId, engine: &ScheduleEngine) -> Self {
        let days: BTreeMap<NaiveDate, Vec<SlotRecord>> = engine
            .days()
            .map(|(date, slots)| (*date, slots.iter().map(SlotRecord::from).collect()))
            .collect();
        let checksum = super::checksum::day_map_checksum(&days);

        Self {
            provider_id,
            generated_at: Utc::now(),
            days,
            checksum,
        }
    }

    /// Rebuild a live engine from this snapshot.
    ///
    /// Records whose time label no longer parses are dropped with a warning
    /// rather than poisoning the whole schedule.
    pub fn hydrate(&self) -> ScheduleEngine {
        let mut engine = ScheduleEngine::new();
        for (date, records) in &self.days {
            let mut slots = Vec::with_capacity(records.len());
            for record in records {
                match ClockTime::parse_label(&record.time) {
                    Some(time) => slots.push(TimeSlot {
                        time,
                        status: record.status,
                    }),
                    None => log::warn!(
                        "dropping slot with unreadable time label '{}' on {}",
                        record.time,
                        date
                    ),
                }
            }
            engine.set_day_slots(*date, slots);
        }
        engine
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// Lightweight listing entry for a provider with a stored schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub provider_id: ProviderId,
    pub day_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl From<&ScheduleSnapshot> for ProviderInfo {
    fn from(snapshot: &ScheduleSnapshot) -> Self {
        Self {
            provider_id: snapshot.provider_id.clone(),
            day_count: snapshot.day_count(),
            generated_at: snapshot.generated_at,
        }
    }
}

/// Receipt for a confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: Uuid,
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    /// Canonical slot label, e.g. "9:30 AM"
    pub time: String,
    /// Patient identifier when the booking flow supplies one
    pub patient_id: Option<String>,
    pub booked_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn new(
        provider_id: ProviderId,
        date: NaiveDate,
        time: impl Into<String>,
        patient_id: Option<String>,
    ) -> Self {
        Self {
            booking_id: Uuid::new_v4(),
            provider_id,
            date,
            time: time.into(),
            patient_id,
            booked_at: Utc::now(),
        }
    }
}
