//! Public API surface for the scheduling backend.
//!
//! This file consolidates the domain types shared by the engine, the service
//! layer, and the HTTP API. Validation happens here, at construction time,
//! so the generation algorithm itself stays total.

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub use crate::models::ClockTime;

/// Provider identifier (natural key; doctors are addressed by this string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn new(value: impl Into<String>) -> Self {
        ProviderId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(value: &str) -> Self {
        ProviderId(value.to_string())
    }
}

/// Booking state of a single time slot.
///
/// Serialized with the capitalized names the portal has always stored
/// ("Available", "Booked", "Unavailable").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Available,
    Booked,
    Unavailable,
}

impl SlotStatus {
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotStatus::Available)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SlotStatus::Available => "Available",
            SlotStatus::Booked => "Booked",
            SlotStatus::Unavailable => "Unavailable",
        };
        write!(f, "{}", name)
    }
}

/// A fixed-duration bookable time unit within a provider's working day.
///
/// Identity is the (date, time) pair; the date is the key of the day map
/// that owns the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: ClockTime,
    pub status: SlotStatus,
}

impl TimeSlot {
    /// Create a freshly generated, open slot.
    pub fn available(time: ClockTime) -> Self {
        Self {
            time,
            status: SlotStatus::Available,
        }
    }

    /// Display/persistence label, e.g. "9:00 AM".
    pub fn label(&self) -> String {
        self.time.label()
    }
}

/// Validation failures for schedule configuration input.
///
/// Raised by the smart constructors below; nothing is partially written when
/// construction fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidScheduleConfiguration {
    #[error("appointment duration must be positive")]
    ZeroDuration,

    #[error("working hours are inverted: start {start} is not before end {end}")]
    InvertedWorkingHours { start: ClockTime, end: ClockTime },

    #[error("date range is inverted: {start} is after {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown weekday name: '{0}'")]
    UnknownWeekday(String),
}

/// The seven canonical weekday names accepted from availability forms.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Resolve a canonical English weekday name (case-insensitive).
pub fn weekday_from_name(name: &str) -> Result<Weekday, InvalidScheduleConfiguration> {
    match name.trim().to_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(InvalidScheduleConfiguration::UnknownWeekday(
            name.to_string(),
        )),
    }
}

/// Recurring weekly availability template: which weekdays a provider works,
/// the daily working hours, the break start, and the appointment duration.
///
/// An empty weekday set is valid and simply materializes nothing. The break
/// is not required to fall inside working hours; an out-of-window break
/// excludes no slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyAvailability {
    days: HashSet<Weekday>,
    start: ClockTime,
    end: ClockTime,
    break_start: ClockTime,
    slot_minutes: u32,
}

impl WeeklyAvailability {
    pub fn new(
        days: HashSet<Weekday>,
        start: ClockTime,
        end: ClockTime,
        break_start: ClockTime,
        slot_minutes: u32,
    ) -> Result<Self, InvalidScheduleConfiguration> {
        if slot_minutes == 0 {
            return Err(InvalidScheduleConfiguration::ZeroDuration);
        }
        if start >= end {
            return Err(InvalidScheduleConfiguration::InvertedWorkingHours { start, end });
        }
        Ok(Self {
            days,
            start,
            end,
            break_start,
            slot_minutes,
        })
    }

    pub fn days(&self) -> &HashSet<Weekday> {
        &self.days
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn break_start(&self) -> ClockTime {
        self.break_start
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday)
    }
}

/// Calendar-day window over which a weekly pattern is materialized.
/// Both endpoints are inclusive and day-granular.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ScheduleRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidScheduleConfiguration> {
        if start > end {
            return Err(InvalidScheduleConfiguration::InvertedDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate every calendar day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}
