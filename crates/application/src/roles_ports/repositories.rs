use async_trait::async_trait;

use staffdesk_core::AppResult;

use super::snapshot::RoleRegistrySnapshot;

/// Persistence port for the roles registry state.
#[async_trait]
pub trait RoleStateStore: Send + Sync {
    /// Loads the last saved snapshot, or an empty one when nothing was saved yet.
    async fn load(&self) -> AppResult<RoleRegistrySnapshot>;

    /// Replaces the saved snapshot.
    async fn save(&self, snapshot: &RoleRegistrySnapshot) -> AppResult<()>;
}
