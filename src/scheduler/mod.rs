//! Schedule engine: materializes a weekly availability pattern into concrete
//! per-day slot lists and manages slot booking state.
//!
//! The engine owns the day-to-slots mapping for a single provider. Consumers
//! read snapshots or request single-slot mutations through the methods here;
//! there is no other mutation path. Cross-provider concerns (locking,
//! persistence) live in the service layer.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::api::{ClockTime, ScheduleRange, SlotStatus, TimeSlot, WeeklyAvailability};


/// Per-provider schedule state: calendar date -> chronological slot list.
///
/// A date with an entry is an "available" day even when every slot in it is
/// booked (or the list is empty); a date without an entry has no working
/// hours at all. That distinction drives the calendar display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleEngine {
    days: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl ScheduleEngine {
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Materialize `availability` over every day of `range`.
    ///
    /// Each day whose weekday is selected receives a fresh slot list
    /// (replacing any previous entry for that date); unselected days are
    /// left untouched and unkeyed. Slots run from the daily start time in
    /// `slot_minutes` steps while strictly before the end time. A slot whose
    /// window overlaps the break window (one appointment duration starting
    /// at the break time) is omitted.
    pub fn generate_schedule(&mut self, availability: &WeeklyAvailability, range: &ScheduleRange) {
        for date in range.days() {
            if availability.works_on(date.weekday()) {
                self.days.insert(date, Self::day_slots(availability));
            }
        }
    }

    fn day_slots(availability: &WeeklyAvailability) -> Vec<TimeSlot> {
        let duration = availability.slot_minutes();
        let mut slots = Vec::new();
        let mut cursor = availability.start();

        while cursor < availability.end() {
            if !overlaps_break(cursor, duration, availability.break_start()) {
                slots.push(TimeSlot::available(cursor));
            }
            match cursor.checked_add_minutes(duration) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        slots
    }

    /// Whether the provider works on `date` at all. True iff an entry exists
    /// for the date, regardless of how many of its slots are booked.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// The day's slots in chronological order; empty when no entry exists.
    pub fn slots_for(&self, date: NaiveDate) -> &[TimeSlot] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Status of the slot identified by `(date, time_label)`, or `None` when
    /// the date has no entry or no slot carries that label.
    pub fn slot_status(&self, date: NaiveDate, time_label: &str) -> Option<SlotStatus> {
        let time = ClockTime::parse_label(time_label)?;
        self.days
            .get(&date)?
            .iter()
            .find(|slot| slot.time == time)
            .map(|slot| slot.status)
    }

    /// Mark the slot identified by `(date, time_label)` as booked.
    ///
    /// Returns whether a matching slot exists; a date without an entry or a
    /// label that matches nothing is a silent no-op. Booking an already
    /// booked slot leaves it booked, so the operation is idempotent.
    ///
    /// Labels are resolved to minute-of-day before matching, which is exact
    /// for every label this engine produces and keeps identity stable across
    /// label formatting.
    pub fn book_slot(&mut self, date: NaiveDate, time_label: &str) -> bool {
        let Some(time) = ClockTime::parse_label(time_label) else {
            return false;
        };
        let Some(slots) = self.days.get_mut(&date) else {
            return false;
        };
        match slots.iter_mut().find(|slot| slot.time == time) {
            Some(slot) => {
                *slot = TimeSlot {
                    time,
                    status: SlotStatus::Booked,
                };
                true
            }
            None => false,
        }
    }

    /// Replace the slot list for one date directly.
    ///
    /// Used when restoring persisted state; schedule publication goes
    /// through `generate_schedule`.
    pub fn set_day_slots(&mut self, date: NaiveDate, slots: Vec<TimeSlot>) {
        self.days.insert(date, slots);
    }

    /// Iterate all days in date order.
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<TimeSlot>)> {
        self.days.iter()
    }

    /// Number of days with an entry.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Drop all schedule state.
    pub fn clear(&mut self) {
        self.days.clear();
    }
}

/// Slot `[start, start+duration)` against break `[break, break+duration)`.
fn overlaps_break(slot_start: ClockTime, duration: u32, break_start: ClockTime) -> bool {
    let slot = u32::from(slot_start.minute_of_day());
    let brk = u32::from(break_start.minute_of_day());
    slot < brk + duration && brk < slot + duration
}
