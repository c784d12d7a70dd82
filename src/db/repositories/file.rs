//! JSON-file-backed repository implementation.
//!
//! Realizes the portal's key-value persistence: each provider's schedule is
//! held in `schedules.json` under the data directory in the flat
//! `{date -> [{time, status}]}` form, with booking receipts appended to
//! `bookings.json`. State loads once at construction and every mutation
//! writes through via a temp-file + rename so a crash mid-write cannot
//! leave either file truncated.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ProviderId;
use crate::db::models::{BookingRecord, ProviderInfo, ScheduleSnapshot};
use crate::db::repository::{
    BookingRepository, ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository,
};

const SCHEDULES_FILE: &str = "schedules.json";
const BOOKINGS_FILE: &str = "bookings.json";

/// Durable repository over two JSON files in a data directory.
pub struct FileRepository {
    data_dir: PathBuf,
    state: RwLock<FileState>,
}

#[derive(Default)]
struct FileState {
    schedules: BTreeMap<ProviderId, ScheduleSnapshot>,
    bookings: Vec<BookingRecord>,
}

impl FileRepository {
    /// Open (creating if necessary) the repository at `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> RepositoryResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| {
            RepositoryError::ConnectionError {
                message: format!("Cannot create data directory: {}", e),
                context: ErrorContext::new("open")
                    .with_details(data_dir.display().to_string()),
            }
        })?;

        let schedules: BTreeMap<ProviderId, ScheduleSnapshot> =
            load_json(&data_dir.join(SCHEDULES_FILE))?;
        let bookings: Vec<BookingRecord> = load_json(&data_dir.join(BOOKINGS_FILE))?;
        log::info!(
            "opened file repository at {} ({} providers, {} bookings)",
            data_dir.display(),
            schedules.len(),
            bookings.len()
        );

        Ok(Self {
            data_dir,
            state: RwLock::new(FileState {
                schedules,
                bookings,
            }),
        })
    }

    /// Directory holding the JSON files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn persist_schedules(&self, state: &FileState) -> RepositoryResult<()> {
        write_atomic(&self.data_dir.join(SCHEDULES_FILE), &state.schedules)
    }

    fn persist_bookings(&self, state: &FileState) -> RepositoryResult<()> {
        write_atomic(&self.data_dir.join(BOOKINGS_FILE), &state.bookings)
    }
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> RepositoryResult<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| RepositoryError::from(e).with_operation("load"))?;
    serde_json::from_str(&content)
        .map_err(|e| RepositoryError::from(e).with_operation("load"))
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> RepositoryResult<()> {
    let serialized = serde_json::to_string_pretty(value)
        .map_err(|e| RepositoryError::from(e).with_operation("persist"))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serialized).map_err(|e| RepositoryError::from(e).with_operation("persist"))?;
    fs::rename(&tmp, path).map_err(|e| RepositoryError::from(e).with_operation("persist"))?;
    Ok(())
}

#[async_trait]
impl ScheduleRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data_dir.is_dir())
    }

    async fn store_snapshot(&self, snapshot: &ScheduleSnapshot) -> RepositoryResult<ProviderInfo> {
        let mut state = self.state.write().unwrap();
        state
            .schedules
            .insert(snapshot.provider_id.clone(), snapshot.clone());
        self.persist_schedules(&state)
            .map_err(|e| e.with_operation("store_snapshot"))?;
        Ok(ProviderInfo::from(snapshot))
    }

    async fn fetch_snapshot(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<ScheduleSnapshot> {
        let state = self.state.read().unwrap();
        state.schedules.get(provider_id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("No schedule stored for provider {}", provider_id),
                ErrorContext::new("fetch_snapshot")
                    .with_entity("schedule")
                    .with_entity_id(provider_id),
            )
        })
    }

    async fn list_providers(&self) -> RepositoryResult<Vec<ProviderInfo>> {
        let state = self.state.read().unwrap();
        Ok(state.schedules.values().map(ProviderInfo::from).collect())
    }

    async fn delete_snapshot(&self, provider_id: &ProviderId) -> RepositoryResult<bool> {
        let mut state = self.state.write().unwrap();
        let existed = state.schedules.remove(provider_id).is_some();
        if existed {
            self.persist_schedules(&state)
                .map_err(|e| e.with_operation("delete_snapshot"))?;
        }
        Ok(existed)
    }
}

#[async_trait]
impl BookingRepository for FileRepository {
    async fn record_booking(&self, booking: &BookingRecord) -> RepositoryResult<()> {
        let mut state = self.state.write().unwrap();
        state.bookings.push(booking.clone());
        self.persist_bookings(&state)
            .map_err(|e| e.with_operation("record_booking"))
    }

    async fn bookings_for_provider(
        &self,
        provider_id: &ProviderId,
    ) -> RepositoryResult<Vec<BookingRecord>> {
        let state = self.state.read().unwrap();
        Ok(state
            .bookings
            .iter()
            .filter(|b| &b.provider_id == provider_id)
            .cloned()
            .collect())
    }
}
