use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::info;

use staffdesk_core::{ActorIdentity, AppError, AppResult};

use crate::roles_ports::{
    Clock, CreateRoleInput, IdGenerator, IdKind, RoleDefinition, RoleRegistrySnapshot,
    RoleStateStore,
};

mod assignments;
mod queries;
mod roles;


/// Sole owner and mutator of roles and role assignments.
///
/// Mutations run under a single writer lock. Each one is applied to a copy of the
/// state, persisted through the [`RoleStateStore`], and only then made visible, so a
/// rejected or failed operation leaves both the store and readers untouched.
#[derive(Clone)]
pub struct RolesRegistry {
    store: Arc<dyn RoleStateStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    state: Arc<RwLock<RoleRegistrySnapshot>>,
}

impl RolesRegistry {
    /// Loads and validates the persisted state.
    pub async fn load(
        store: Arc<dyn RoleStateStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let snapshot = store.load().await?;
        snapshot.validate()?;

        info!(
            roles = snapshot.roles.len(),
            assignments = snapshot.assignments.len(),
            "roles registry loaded"
        );

        Ok(Self {
            store,
            ids,
            clock,
            state: Arc::new(RwLock::new(snapshot)),
        })
    }

    /// Creates the given roles when the registry holds no role yet.
    ///
    /// Returns the number of roles created. All roles are created in one commit.
    pub async fn seed_if_empty(
        &self,
        roles: Vec<CreateRoleInput>,
        actor: &ActorIdentity,
    ) -> AppResult<usize> {
        if !self.state.read().await.roles.is_empty() {
            return Ok(0);
        }

        let validated = roles
            .into_iter()
            .map(roles::validate_new_role)
            .collect::<AppResult<Vec<_>>>()?;

        let created = self
            .mutate(|state| {
                if !state.roles.is_empty() {
                    return Ok(0);
                }

                let count = validated.len();
                for input in validated {
                    self.insert_role(state, input, actor)?;
                }
                Ok(count)
            })
            .await?;

        if created > 0 {
            info!(created, actor = %actor, "seeded roles registry");
        }

        Ok(created)
    }

    async fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut RoleRegistrySnapshot) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let output = operation(&mut next)?;
        self.commit(&mut guard, next).await?;
        Ok(output)
    }

    async fn commit(
        &self,
        guard: &mut RwLockWriteGuard<'_, RoleRegistrySnapshot>,
        next: RoleRegistrySnapshot,
    ) -> AppResult<()> {
        self.store.save(&next).await?;
        **guard = next;
        Ok(())
    }

    /// Draws ids until one is unused in `state`.
    fn fresh_id(&self, state: &RoleRegistrySnapshot, kind: IdKind) -> AppResult<String> {
        let attempts = state.roles.len() + state.assignments.len() + 1;
        for _ in 0..attempts {
            let id = self.ids.next_id(kind);
            if !state.contains_id(kind, id.as_str()) {
                return Ok(id);
            }
        }

        Err(AppError::Internal(format!(
            "id generator produced no unused {} id after {attempts} attempts",
            kind.prefix()
        )))
    }

    fn definition_of(state: &RoleRegistrySnapshot, role_id: &str) -> Option<RoleDefinition> {
        state.role(role_id).map(|role| state.definition(role))
    }
}
