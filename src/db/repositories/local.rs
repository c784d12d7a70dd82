//! In-memory local repository implementation.
//!
//! Stores all data in process memory, giving tests and local development a
//! fast, deterministic, isolated backend with the same observable behavior
//! as the durable stores.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::api::ProviderId;
use crate::db::models::{BookingRecord, ProviderInfo, ScheduleSnapshot};
use crate::db::repository::{
    BookingRepository, RepositoryError, RepositoryResult, ScheduleRepository,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use medsched::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.provider_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    schedules: HashMap<ProviderId, ScheduleSnapshot>,
    bookings: Vec<BookingRecord>,

    // Connection health, toggleable for failure-path tests
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            schedules: HashMap::new(),
            bookings: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    /// Number of providers with a stored schedule.
    pub fn provider_count(&self) -> usize {
        self.data.read().unwrap().schedules.len()
    }

    /// Total number of booking receipts across all providers.
    pub fn booking_count(&self) -> usize {
        self.data.read().unwrap().bookings.len()
    }

    /// Check if a provider has a stored schedule.
    pub fn has_schedule(&self, provider_id: &ProviderId) -> bool {
        self.data
            .read()
            .unwrap()
            .schedules
            .contains_key(provider_id)
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().unwrap().is_healthy {
            return Err(RepositoryError::connection("Repository is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }

    async fn store_snapshot(&self, snapshot: &ScheduleSnapshot) -> RepositoryResult<ProviderInfo> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.schedules
            .insert(snapshot.provider_id.clone(), snapshot.clone());
        Ok(ProviderInfo::from(snapshot))
    }

    async fn fetch_snapshot(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<ScheduleSnapshot> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.schedules.get(provider_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("No schedule stored for provider {}", provider_id))
        })
    }

    async fn list_providers(&self) -> RepositoryResult<Vec<ProviderInfo>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut providers: Vec<ProviderInfo> =
            data.schedules.values().map(ProviderInfo::from).collect();
        providers.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));
        Ok(providers)
    }

    async fn delete_snapshot(&self, provider_id: &ProviderId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        Ok(data.schedules.remove(provider_id).is_some())
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn record_booking(&self, booking: &BookingRecord) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.bookings.push(booking.clone());
        Ok(())
    }

    async fn bookings_for_provider(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<BookingRecord>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .bookings
            .iter()
            .filter(|b| &b.provider_id == provider_id)
            .cloned()
            .collect())
    }
}
