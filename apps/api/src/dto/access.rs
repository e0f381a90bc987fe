use serde::{Deserialize, Serialize};
use staffdesk_domain::{
    AppModule, ApprovalAuthorityLevel, DataScope, EffectivePermissions, FieldAccessLevel,
    ModulePermission, PermissionAction,
};

/// Query for a single module action check, optionally over a record scope.
#[derive(Debug, Deserialize)]
pub struct AccessCheckQuery {
    pub module: String,
    pub action: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Verdict of a module action check.
#[derive(Debug, Serialize)]
pub struct AccessCheckResponse {
    pub employee_id: String,
    pub module: AppModule,
    pub action: PermissionAction,
    pub scope: Option<DataScope>,
    pub allowed: bool,
}

/// Query for one field of a module.
#[derive(Debug, Deserialize)]
pub struct FieldAccessQuery {
    pub module: String,
    pub field: String,
}

/// Verdict for one field of a module.
#[derive(Debug, Serialize)]
pub struct FieldAccessResponse {
    pub employee_id: String,
    pub module: AppModule,
    pub field: String,
    pub access: FieldAccessLevel,
}

/// Composed permissions of one employee across every role they hold.
#[derive(Debug, Serialize)]
pub struct EffectivePermissionsResponse {
    pub employee_id: String,
    pub highest_approval_level: u8,
    pub modules: Vec<ModulePermission>,
}

impl EffectivePermissionsResponse {
    pub fn new(
        employee_id: String,
        permissions: EffectivePermissions,
        highest_approval_level: ApprovalAuthorityLevel,
    ) -> Self {
        Self {
            employee_id,
            highest_approval_level: highest_approval_level.value(),
            modules: permissions.iter().cloned().collect(),
        }
    }
}
