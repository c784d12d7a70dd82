//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    BookingListResponse, BookingRequest, BookingResponse, CalendarQuery, DaySlotsResponse,
    HealthResponse, ProviderInfoDto, ProviderListResponse, PublishScheduleRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::ProviderId;
use crate::db::models::{ScheduleSnapshot, SlotRecord};
use crate::services;
use crate::services::booking::BookingOutcome;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Providers & Schedules
// =============================================================================

/// GET /v1/providers
///
/// List every provider with a stored schedule.
pub async fn list_providers(State(state): State<AppState>) -> HandlerResult<ProviderListResponse> {
    let providers = services::list_providers(state.repository.as_ref()).await?;

    let provider_dtos: Vec<ProviderInfoDto> = providers.into_iter().map(Into::into).collect();
    let total = provider_dtos.len();

    Ok(Json(ProviderListResponse {
        providers: provider_dtos,
        total,
    }))
}

/// PUT /v1/providers/{provider_id}/schedule
///
/// Publish (or replace) a provider's schedule from the availability form.
pub async fn publish_schedule(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Json(request): Json<PublishScheduleRequest>,
) -> HandlerResult<ProviderInfoDto> {
    let provider_id = ProviderId::new(provider_id);
    let (availability, range) = request.into_domain()?;

    let info = services::publish_schedule(
        state.repository.as_ref(),
        &state.registry,
        &provider_id,
        &availability,
        &range,
    )
    .await?;

    Ok(Json(info.into()))
}

/// GET /v1/providers/{provider_id}/schedule
///
/// Fetch the stored schedule snapshot for a provider.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> HandlerResult<ScheduleSnapshot> {
    let provider_id = ProviderId::new(provider_id);
    let snapshot = services::get_schedule(state.repository.as_ref(), &provider_id).await?;
    Ok(Json(snapshot))
}

// =============================================================================
// Calendar & Day Views
// =============================================================================

/// GET /v1/providers/{provider_id}/calendar?from=...&to=...
///
/// Per-day availability flags for the calendar display.
pub async fn get_calendar(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> HandlerResult<Vec<services::DayAvailability>> {
    let provider_id = ProviderId::new(provider_id);
    let window = crate::api::ScheduleRange::new(query.from, query.to)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    services::ensure_restored(state.repository.as_ref(), &state.registry, &provider_id).await?;
    let days = services::calendar_availability(&state.registry, &provider_id, &window).await;
    Ok(Json(days))
}

/// GET /v1/providers/{provider_id}/days/{date}
///
/// Slot list for one day.
pub async fn get_day(
    State(state): State<AppState>,
    Path((provider_id, date)): Path<(String, NaiveDate)>,
) -> HandlerResult<DaySlotsResponse> {
    let provider_id = ProviderId::new(provider_id);

    services::ensure_restored(state.repository.as_ref(), &state.registry, &provider_id).await?;
    let window = crate::api::ScheduleRange::single_day(date);
    let available = services::calendar_availability(&state.registry, &provider_id, &window)
        .await
        .first()
        .map(|d| d.available)
        .unwrap_or(false);
    let slots = services::day_slots(&state.registry, &provider_id, date).await;

    Ok(Json(DaySlotsResponse {
        date,
        available,
        slots: slots.iter().map(SlotRecord::from).collect(),
    }))
}

// =============================================================================
// Bookings
// =============================================================================

/// POST /v1/providers/{provider_id}/bookings
///
/// Book an open slot. Unknown slots map to 404 and already-booked slots to
/// 409 so the booking flow can simply refresh and retry.
pub async fn create_booking(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Json(request): Json<BookingRequest>,
) -> HandlerResult<BookingResponse> {
    let provider_id = ProviderId::new(provider_id);

    services::ensure_restored(state.repository.as_ref(), &state.registry, &provider_id).await?;
    let outcome = services::book_slot(
        state.repository.as_ref(),
        &state.registry,
        &provider_id,
        request.date,
        &request.time,
        request.patient_id,
    )
    .await?;

    match outcome {
        BookingOutcome::Confirmed { booking } => Ok(Json(BookingResponse { booking })),
        BookingOutcome::AlreadyBooked => Err(AppError::Conflict(format!(
            "Slot {} on {} is already booked",
            request.time, request.date
        ))),
        BookingOutcome::SlotNotFound => Err(AppError::NotFound(format!(
            "No slot {} on {} for provider {}",
            request.time, request.date, provider_id
        ))),
    }
}

/// GET /v1/providers/{provider_id}/bookings
///
/// Booking receipts for a provider.
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> HandlerResult<BookingListResponse> {
    let provider_id = ProviderId::new(provider_id);
    let bookings = services::list_bookings(state.repository.as_ref(), &provider_id).await?;
    let total = bookings.len();

    Ok(Json(BookingListResponse { bookings, total }))
}
