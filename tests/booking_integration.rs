use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};

use medsched::api::{ClockTime, ProviderId, ScheduleRange, SlotStatus, TimeSlot, WeeklyAvailability};
use medsched::db::repositories::LocalRepository;
use medsched::services::{self, BookingOutcome, ScheduleRegistry};

fn t(h: u32, m: u32) -> ClockTime {
    ClockTime::from_hm(h, m).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn mornings() -> WeeklyAvailability {
    WeeklyAvailability::new(
        HashSet::from([Weekday::Mon]),
        t(9, 0),
        t(11, 0),
        t(10, 0),
        30,
    )
    .unwrap()
}

async fn published(repo: &LocalRepository, registry: &ScheduleRegistry) -> ProviderId {
    let provider = ProviderId::new("dr-ayesha");
    services::publish_schedule(
        repo,
        registry,
        &provider,
        &mornings(),
        &ScheduleRange::single_day(monday()),
    )
    .await
    .unwrap();
    provider
}

#[tokio::test]
async fn test_booking_confirms_and_persists() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = published(&repo, &registry).await;

    let outcome = services::book_slot(
        &repo,
        &registry,
        &provider,
        monday(),
        "9:30 AM",
        Some("patient-7".to_string()),
    )
    .await
    .unwrap();

    let BookingOutcome::Confirmed { booking } = outcome else {
        panic!("expected a confirmed booking");
    };
    assert_eq!(booking.time, "9:30 AM");
    assert_eq!(booking.patient_id.as_deref(), Some("patient-7"));

    // The stored snapshot reflects the transition.
    let snapshot = services::get_schedule(&repo, &provider).await.unwrap();
    let slots = snapshot.days.get(&monday()).unwrap();
    let statuses: Vec<SlotStatus> = slots.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            SlotStatus::Available,
            SlotStatus::Booked,
            SlotStatus::Available
        ]
    );

    let receipts = services::list_bookings(&repo, &provider).await.unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].booking_id, booking.booking_id);
}

#[tokio::test]
async fn test_rebooking_same_slot_conflicts() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = published(&repo, &registry).await;

    let first = services::book_slot(&repo, &registry, &provider, monday(), "9:00 AM", None)
        .await
        .unwrap();
    assert!(first.is_confirmed());

    let second = services::book_slot(&repo, &registry, &provider, monday(), "9:00 AM", None)
        .await
        .unwrap();
    assert_eq!(second, BookingOutcome::AlreadyBooked);

    // No duplicate receipt was written.
    let receipts = services::list_bookings(&repo, &provider).await.unwrap();
    assert_eq!(receipts.len(), 1);
}

#[tokio::test]
async fn test_booking_unknown_slot_is_soft_miss() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = published(&repo, &registry).await;
    let before = services::get_schedule(&repo, &provider).await.unwrap();

    // 8:00 AM was never generated; 10:00 AM fell inside the break.
    for label in ["8:00 AM", "10:00 AM", "not a time"] {
        let outcome = services::book_slot(&repo, &registry, &provider, monday(), label, None)
            .await
            .unwrap();
        assert_eq!(outcome, BookingOutcome::SlotNotFound, "label {}", label);
    }

    let after = services::get_schedule(&repo, &provider).await.unwrap();
    assert_eq!(after, before);
    assert!(services::list_bookings(&repo, &provider)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_booking_label_is_canonicalized() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = published(&repo, &registry).await;

    let outcome = services::book_slot(&repo, &registry, &provider, monday(), "9:30 am", None)
        .await
        .unwrap();

    let BookingOutcome::Confirmed { booking } = outcome else {
        panic!("expected a confirmed booking");
    };
    assert_eq!(booking.time, "9:30 AM");
}

#[tokio::test]
async fn test_booking_after_restart_restores_first() {
    let repo = LocalRepository::new();
    let provider = {
        let registry = ScheduleRegistry::new();
        published(&repo, &registry).await
    };

    let registry = ScheduleRegistry::new();
    services::ensure_restored(&repo, &registry, &provider)
        .await
        .unwrap();

    let outcome = services::book_slot(&repo, &registry, &provider, monday(), "10:30 AM", None)
        .await
        .unwrap();
    assert!(outcome.is_confirmed());
}

#[tokio::test]
async fn test_unavailable_slot_is_not_bookable() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = ProviderId::new("dr-ayesha");

    // An Unavailable slot only enters through restored external state.
    {
        let handle = registry.engine_for(&provider);
        let mut engine = handle.lock().await;
        engine.set_day_slots(
            monday(),
            vec![TimeSlot {
                time: t(9, 0),
                status: SlotStatus::Unavailable,
            }],
        );
    }

    let outcome = services::book_slot(&repo, &registry, &provider, monday(), "9:00 AM", None)
        .await
        .unwrap();
    assert_eq!(outcome, BookingOutcome::SlotNotFound);
}

#[tokio::test]
async fn test_concurrent_bookings_resolve_to_one_confirmation() {
    let repo = LocalRepository::new();
    let registry = ScheduleRegistry::new();
    let provider = published(&repo, &registry).await;

    let (a, b) = tokio::join!(
        services::book_slot(&repo, &registry, &provider, monday(), "9:00 AM", None),
        services::book_slot(&repo, &registry, &provider, monday(), "9:00 AM", None),
    );

    let outcomes = [a.unwrap(), b.unwrap()];
    let confirmed = outcomes.iter().filter(|o| o.is_confirmed()).count();
    let conflicted = outcomes
        .iter()
        .filter(|o| **o == BookingOutcome::AlreadyBooked)
        .count();
    assert_eq!((confirmed, conflicted), (1, 1));

    let receipts = services::list_bookings(&repo, &provider).await.unwrap();
    assert_eq!(receipts.len(), 1);
}
