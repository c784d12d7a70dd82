//! Persistence module for schedule and booking data.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, embedding crates)          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic              │
//! │  - Snapshot checksum deduplication                       │
//! │  - Per-provider locking and booking discipline           │
//! └───────────────────┬─────────────────────────────────────┘
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!     ┌───────────────┴────────────────┐
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ File Repository  │     │ Local Repository        │
//! │ (JSON files)     │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Contents
//! - `repository`: Trait definitions and error types
//! - `repositories::local`: In-memory implementation for unit testing and
//!   local development
//! - `repositories::file`: JSON-file implementation for durable state
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: TOML configuration file support
//! - `models`: Persisted data shapes (snapshots, receipts)
//! - `checksum`: Snapshot checksum calculation

#[cfg(not(any(feature = "file-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use checksum::calculate_checksum;
pub use factory::{RepositoryFactory, RepositoryType};
pub use models::{BookingRecord, ProviderInfo, ScheduleSnapshot, SlotRecord};
pub use repo_config::RepositoryConfig;
#[cfg(feature = "file-repo")]
pub use repositories::FileRepository;
pub use repositories::LocalRepository;
pub use repository::{
    BookingRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    ScheduleRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton from environment
/// configuration. Safe to call more than once; later calls are no-ops.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env()
        .map_err(|e| anyhow::Error::msg(e.to_string()))
        .context("Failed to create repository from environment")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
