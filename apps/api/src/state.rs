use staffdesk_application::{AccessService, RolesRegistry};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub roles_registry: RolesRegistry,
    pub access_service: AccessService,
}

impl AppState {
    pub fn new(roles_registry: RolesRegistry) -> Self {
        Self {
            access_service: AccessService::new(roles_registry.clone()),
            roles_registry,
        }
    }
}
