//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "file-repo")]
use super::repositories::FileRepository;
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// JSON-file-backed durable store
    File,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment.
    ///
    /// Reads `REPOSITORY_TYPE`; otherwise defaults to File when a data
    /// directory is configured via `MEDSCHED_DATA_DIR`, else Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("MEDSCHED_DATA_DIR").is_ok() {
            Self::File
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use medsched::db::{RepositoryFactory, RepositoryType};
///
/// let local = RepositoryFactory::create_local();
/// let durable = RepositoryFactory::create(RepositoryType::File, Some("./data".as_ref()))?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `data_dir` is required for the File type and ignored for Local.
    pub fn create(
        repo_type: RepositoryType,
        data_dir: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::File => {
                #[cfg(feature = "file-repo")]
                {
                    let dir = data_dir.ok_or_else(|| {
                        RepositoryError::configuration(
                            "File repository requires a data directory",
                        )
                    })?;
                    Ok(Self::create_file(dir)?)
                }
                #[cfg(not(feature = "file-repo"))]
                {
                    let _ = data_dir;
                    Err(RepositoryError::configuration(
                        "File repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a file-backed repository rooted at `data_dir`.
    #[cfg(feature = "file-repo")]
    pub fn create_file(data_dir: &Path) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = FileRepository::open(data_dir)?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from environment configuration.
    ///
    /// `MEDSCHED_DATA_DIR` overrides the config-file data directory for the
    /// File type.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env();
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::File => {
                let data_dir = std::env::var("MEDSCHED_DATA_DIR")
                    .map(std::path::PathBuf::from)
                    .or_else(|_| {
                        RepositoryConfig::from_default_location().map(|c| c.data_dir())
                    })
                    .unwrap_or_else(|_| std::path::PathBuf::from("./data"));
                Self::create(RepositoryType::File, Some(&data_dir))
            }
        }
    }

    /// Create a repository from a parsed configuration file.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config
            .repository_type()
            .map_err(RepositoryError::configuration)?;
        Self::create(repo_type, Some(&config.data_dir()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ScheduleRepository;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("file").unwrap(), RepositoryType::File);
        assert_eq!(RepositoryType::from_str("json").unwrap(), RepositoryType::File);
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[test]
    fn test_create_local() {
        let repo = RepositoryFactory::create_local();
        // A fresh local repository lists no providers.
        let providers = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(repo.list_providers())
            .unwrap();
        assert!(providers.is_empty());
    }

    #[test]
    fn test_create_requires_data_dir_for_file() {
        let result = RepositoryFactory::create(RepositoryType::File, None);
        assert!(result.is_err());
    }
}
