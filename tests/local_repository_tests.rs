use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};

use medsched::api::{ClockTime, ProviderId, ScheduleRange, WeeklyAvailability};
use medsched::db::models::{BookingRecord, ScheduleSnapshot};
use medsched::db::repositories::LocalRepository;
use medsched::db::repository::{
    BookingRepository, RepositoryError, ScheduleRepository,
};
use medsched::scheduler::ScheduleEngine;

fn snapshot_for(provider: &str) -> ScheduleSnapshot {
    let avail = WeeklyAvailability::new(
        HashSet::from([Weekday::Mon]),
        ClockTime::from_hm(9, 0).unwrap(),
        ClockTime::from_hm(10, 0).unwrap(),
        ClockTime::from_hm(20, 0).unwrap(),
        30,
    )
    .unwrap();
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let mut engine = ScheduleEngine::new();
    engine.generate_schedule(&avail, &ScheduleRange::single_day(monday));
    ScheduleSnapshot::capture(ProviderId::new(provider), &engine)
}

#[tokio::test]
async fn test_store_and_fetch_snapshot() {
    let repo = LocalRepository::new();
    let snapshot = snapshot_for("dr-a");

    let info = repo.store_snapshot(&snapshot).await.unwrap();
    assert_eq!(info.day_count, 1);
    assert!(repo.has_schedule(&ProviderId::new("dr-a")));

    let fetched = repo.fetch_snapshot(&ProviderId::new("dr-a")).await.unwrap();
    assert_eq!(fetched, snapshot);
}

#[tokio::test]
async fn test_fetch_missing_is_not_found() {
    let repo = LocalRepository::new();
    let err = repo
        .fetch_snapshot(&ProviderId::new("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_store_replaces_existing() {
    let repo = LocalRepository::new();
    repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap();
    repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap();
    assert_eq!(repo.provider_count(), 1);
}

#[tokio::test]
async fn test_list_providers_sorted() {
    let repo = LocalRepository::new();
    repo.store_snapshot(&snapshot_for("dr-b")).await.unwrap();
    repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap();

    let providers = repo.list_providers().await.unwrap();
    let ids: Vec<&str> = providers.iter().map(|p| p.provider_id.value()).collect();
    assert_eq!(ids, vec!["dr-a", "dr-b"]);
}

#[tokio::test]
async fn test_delete_snapshot() {
    let repo = LocalRepository::new();
    repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap();

    assert!(repo.delete_snapshot(&ProviderId::new("dr-a")).await.unwrap());
    assert!(!repo.delete_snapshot(&ProviderId::new("dr-a")).await.unwrap());
    assert_eq!(repo.provider_count(), 0);
}

#[tokio::test]
async fn test_bookings_filtered_by_provider() {
    let repo = LocalRepository::new();
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    let a = BookingRecord::new(ProviderId::new("dr-a"), monday, "9:00 AM", None);
    let b = BookingRecord::new(ProviderId::new("dr-b"), monday, "9:30 AM", None);
    repo.record_booking(&a).await.unwrap();
    repo.record_booking(&b).await.unwrap();
    assert_eq!(repo.booking_count(), 2);

    let for_a = repo
        .bookings_for_provider(&ProviderId::new("dr-a"))
        .await
        .unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].booking_id, a.booking_id);
}

#[tokio::test]
async fn test_unhealthy_repository_fails_operations() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!repo.health_check().await.unwrap());

    let err = repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    assert!(err.is_retryable());

    repo.set_healthy(true);
    assert!(repo.store_snapshot(&snapshot_for("dr-a")).await.is_ok());
}

#[tokio::test]
async fn test_clear_preserves_health_flag() {
    let repo = LocalRepository::new();
    repo.store_snapshot(&snapshot_for("dr-a")).await.unwrap();
    repo.set_healthy(false);

    repo.clear();
    assert_eq!(repo.provider_count(), 0);
    assert!(!repo.health_check().await.unwrap());
}
