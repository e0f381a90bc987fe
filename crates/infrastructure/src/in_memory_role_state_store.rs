use async_trait::async_trait;
use staffdesk_application::{RoleRegistrySnapshot, RoleStateStore};
use staffdesk_core::AppResult;
use tokio::sync::RwLock;

/// In-memory state store used for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct InMemoryRoleStateStore {
    snapshot: RwLock<RoleRegistrySnapshot>,
}

impl InMemoryRoleStateStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: RoleRegistrySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl RoleStateStore for InMemoryRoleStateStore {
    async fn load(&self) -> AppResult<RoleRegistrySnapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &RoleRegistrySnapshot) -> AppResult<()> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use staffdesk_application::{RoleRegistrySnapshot, RoleStateStore, RolesRegistry};
    use staffdesk_core::ActorIdentity;

    use super::InMemoryRoleStateStore;
    use crate::{SequentialIdGenerator, SystemClock, system_roles};

    #[tokio::test]
    async fn empty_store_loads_empty_snapshot() {
        let store = InMemoryRoleStateStore::new();
        let loaded = store.load().await;
        assert_eq!(loaded.ok(), Some(RoleRegistrySnapshot::default()));
    }

    #[tokio::test]
    async fn registry_reloads_from_preloaded_snapshot() {
        let Ok(system) = ActorIdentity::new("System") else {
            panic!("actor fixture rejected");
        };
        let original = Arc::new(InMemoryRoleStateStore::new());
        let Ok(registry) = RolesRegistry::load(
            original.clone(),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(SystemClock),
        )
        .await
        else {
            panic!("registry failed to load");
        };
        assert!(registry.seed_if_empty(system_roles(), &system).await.is_ok());
        let Ok(snapshot) = original.load().await else {
            panic!("snapshot unavailable");
        };

        let reloaded = RolesRegistry::load(
            Arc::new(InMemoryRoleStateStore::with_snapshot(snapshot)),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(SystemClock),
        )
        .await;
        let Ok(reloaded) = reloaded else {
            panic!("registry failed to reload");
        };

        assert_eq!(reloaded.list_roles().await, registry.list_roles().await);
        assert_eq!(reloaded.seed_if_empty(system_roles(), &system).await.ok(), Some(0));
    }
}
