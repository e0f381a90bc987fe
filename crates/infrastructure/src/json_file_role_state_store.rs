use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use staffdesk_application::{RoleRegistrySnapshot, RoleStateStore};
use staffdesk_core::{AppError, AppResult};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// State store persisting the registry snapshot as one JSON document.
///
/// Writes go to a sibling temporary file that is renamed over the target, so a
/// crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug)]
pub struct JsonFileRoleStateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRoleStateStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl RoleStateStore for JsonFileRoleStateStore {
    async fn load(&self) -> AppResult<RoleRegistrySnapshot> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no roles snapshot found, starting empty");
                return Ok(RoleRegistrySnapshot::default());
            }
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read roles snapshot '{}': {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|error| {
            AppError::Validation(format!(
                "roles snapshot '{}' is malformed: {error}",
                self.path.display()
            ))
        })
    }

    async fn save(&self, snapshot: &RoleRegistrySnapshot) -> AppResult<()> {
        let payload = serde_json::to_vec_pretty(snapshot).map_err(|error| {
            AppError::Internal(format!("failed to encode roles snapshot: {error}"))
        })?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create snapshot directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let temporary_path = self.temporary_path();
        tokio::fs::write(&temporary_path, &payload)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write roles snapshot '{}': {error}",
                    temporary_path.display()
                ))
            })?;
        tokio::fs::rename(&temporary_path, &self.path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace roles snapshot '{}': {error}",
                    self.path.display()
                ))
            })?;

        debug!(
            path = %self.path.display(),
            roles = snapshot.roles.len(),
            assignments = snapshot.assignments.len(),
            "roles snapshot saved"
        );
        Ok(())
    }
}
