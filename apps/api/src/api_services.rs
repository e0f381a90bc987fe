use std::sync::Arc;

use staffdesk_application::{RoleStateStore, RolesRegistry};
use staffdesk_core::{ActorIdentity, AppError};
use staffdesk_infrastructure::{
    InMemoryRoleStateStore, JsonFileRoleStateStore, SystemClock, UuidIdGenerator, system_roles,
};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

const SEED_ACTOR: &str = "System";

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let store: Arc<dyn RoleStateStore> = match &config.state_path {
        Some(path) => {
            let store = JsonFileRoleStateStore::new(path.clone());
            info!(path = %store.path().display(), "using json file roles store");
            Arc::new(store)
        }
        None => {
            info!("using in-memory roles store");
            Arc::new(InMemoryRoleStateStore::new())
        }
    };

    let registry =
        RolesRegistry::load(store, Arc::new(UuidIdGenerator), Arc::new(SystemClock)).await?;

    if config.seed_system_roles {
        let actor = ActorIdentity::new(SEED_ACTOR)?;
        registry.seed_if_empty(system_roles(), &actor).await?;
    }

    Ok(AppState::new(registry))
}
