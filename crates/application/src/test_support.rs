use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use staffdesk_core::{ActorIdentity, AppError, AppResult};
use staffdesk_domain::{
    AppModule, DataScope, ModulePermission, PermissionAction, PermissionActions, RoleType,
};

use crate::roles_ports::{
    Clock, CreateRoleInput, IdGenerator, IdKind, RoleRegistrySnapshot, RoleStateStore,
};
use crate::RolesRegistry;

#[derive(Default)]
pub(crate) struct FakeStateStore {
    pub(crate) snapshot: Mutex<RoleRegistrySnapshot>,
    pub(crate) saves: AtomicU64,
    pub(crate) fail_saves: AtomicBool,
}

#[async_trait]
impl RoleStateStore for FakeStateStore {
    async fn load(&self) -> AppResult<RoleRegistrySnapshot> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, snapshot: &RoleRegistrySnapshot) -> AppResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().await = snapshot.clone();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct SequenceIds {
    next: AtomicU64,
}

impl IdGenerator for SequenceIds {
    fn next_id(&self, kind: IdKind) -> String {
        let value = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{value}", kind.prefix())
    }
}

/// Clock that moves one minute forward on every reading.
#[derive(Default)]
pub(crate) struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
            .single()
            .unwrap_or_default();
        start + Duration::minutes(tick)
    }
}

pub(crate) fn actor(name: &str) -> ActorIdentity {
    match ActorIdentity::new(name) {
        Ok(actor) => actor,
        Err(error) => panic!("actor fixture: {error}"),
    }
}

pub(crate) fn row(
    module: AppModule,
    actions: &[PermissionAction],
    scope: DataScope,
) -> ModulePermission {
    ModulePermission::new(module, PermissionActions::only(actions), scope)
}

pub(crate) fn role_input(
    name: &str,
    role_type: RoleType,
    permissions: Vec<ModulePermission>,
) -> CreateRoleInput {
    CreateRoleInput {
        name: name.to_owned(),
        description: format!("{name} role"),
        role_type,
        permissions,
        approval_authority_level: 0,
    }
}

pub(crate) async fn registry_with_store(store: Arc<FakeStateStore>) -> RolesRegistry {
    match RolesRegistry::load(
        store,
        Arc::new(SequenceIds::default()),
        Arc::new(SteppingClock::default()),
    )
    .await
    {
        Ok(registry) => registry,
        Err(error) => panic!("registry fixture: {error}"),
    }
}
