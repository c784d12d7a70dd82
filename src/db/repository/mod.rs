//! Repository trait definitions for persistence operations.
//!
//! Storage responsibilities are split across focused traits so backends stay
//! small and individually testable:
//!
//! - [`ScheduleRepository`]: schedule snapshot CRUD per provider
//! - [`BookingRepository`]: booking receipt log
//!
//! A complete backend implements both; use the [`FullRepository`] bound when
//! a function needs everything:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     repo.store_snapshot(&snapshot).await?;
//!     repo.record_booking(&booking).await?;
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::ProviderId;
use crate::db::models::{BookingRecord, ProviderInfo, ScheduleSnapshot};

/// Persistence operations for provider schedule snapshots.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check that the backing store is reachable and usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store (or replace) the snapshot for its provider.
    async fn store_snapshot(&self, snapshot: &ScheduleSnapshot) -> RepositoryResult<ProviderInfo>;

    /// Fetch the stored snapshot for a provider.
    ///
    /// Returns `RepositoryError::NotFound` when the provider has never
    /// published a schedule.
    async fn fetch_snapshot(&self, provider_id: &ProviderId)
        -> RepositoryResult<ScheduleSnapshot>;

    /// List every provider with a stored schedule.
    async fn list_providers(&self) -> RepositoryResult<Vec<ProviderInfo>>;

    /// Delete a provider's snapshot. Returns whether anything was removed.
    async fn delete_snapshot(&self, provider_id: &ProviderId) -> RepositoryResult<bool>;
}

/// Persistence operations for booking receipts.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a booking receipt.
    async fn record_booking(&self, booking: &BookingRecord) -> RepositoryResult<()>;

    /// All receipts for one provider, oldest first.
    async fn bookings_for_provider(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<BookingRecord>>;
}

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both repository
/// traits.
pub trait FullRepository: ScheduleRepository + BookingRepository {}

impl<T: ScheduleRepository + BookingRepository> FullRepository for T {}
