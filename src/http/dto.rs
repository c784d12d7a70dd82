//! Data Transfer Objects for the HTTP API.
//!
//! Request DTOs arrive as plain strings (weekday names, "HH:MM" times) and
//! convert into validated domain types here, at the boundary; everything
//! past this point works with the smart-constructed types from `api`.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::api::{
    weekday_from_name, ClockTime, ScheduleRange, WeeklyAvailability,
};
use crate::db::models::{BookingRecord, ProviderInfo, SlotRecord};

use super::error::AppError;

/// Request body for publishing a provider's schedule, mirroring the
/// availability form: weekday toggles, daily hours, break, duration, and
/// the date range to materialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishScheduleRequest {
    /// Canonical weekday names ("Monday", ...)
    pub days: Vec<String>,
    /// Daily start time, 24-hour "HH:MM"
    pub start_time: String,
    /// Daily end time, 24-hour "HH:MM"
    pub end_time: String,
    /// Break start time, 24-hour "HH:MM"
    pub break_time: String,
    /// Appointment duration in minutes
    pub slot_minutes: u32,
    /// First day to materialize (inclusive)
    pub start_date: NaiveDate,
    /// Last day to materialize (inclusive)
    pub end_date: NaiveDate,
}

fn parse_clock(value: &str, field: &str) -> Result<ClockTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(ClockTime::from)
        .map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid {}: '{}' (expected HH:MM)",
                field, value
            ))
        })
}

impl PublishScheduleRequest {
    /// Validate and convert into domain types.
    pub fn into_domain(self) -> Result<(WeeklyAvailability, ScheduleRange), AppError> {
        let mut days: HashSet<Weekday> = HashSet::new();
        for name in &self.days {
            days.insert(weekday_from_name(name)?);
        }

        let start = parse_clock(&self.start_time, "start_time")?;
        let end = parse_clock(&self.end_time, "end_time")?;
        let break_start = parse_clock(&self.break_time, "break_time")?;

        let availability = WeeklyAvailability::new(days, start, end, break_start, self.slot_minutes)?;
        let range = ScheduleRange::new(self.start_date, self.end_date)?;
        Ok((availability, range))
    }
}

/// Request body for booking a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Day of the slot
    pub date: NaiveDate,
    /// Slot label as displayed, e.g. "9:30 AM"
    pub time: String,
    /// Optional patient identifier for the receipt
    #[serde(default)]
    pub patient_id: Option<String>,
}

/// Response for a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: BookingRecord,
}

/// Query parameters for the calendar endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// First visible day (inclusive)
    pub from: NaiveDate,
    /// Last visible day (inclusive)
    pub to: NaiveDate,
}

/// Slots for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub date: NaiveDate,
    /// Whether the provider works this day at all
    pub available: bool,
    pub slots: Vec<SlotRecord>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
}

/// Provider list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderListResponse {
    pub providers: Vec<ProviderInfoDto>,
    pub total: usize,
}

/// Provider info DTO for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfoDto {
    pub provider_id: String,
    pub day_count: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProviderInfo> for ProviderInfoDto {
    fn from(info: ProviderInfo) -> Self {
        Self {
            provider_id: info.provider_id.0,
            day_count: info.day_count,
            generated_at: info.generated_at,
        }
    }
}

/// Booking receipts response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingRecord>,
    pub total: usize,
}
