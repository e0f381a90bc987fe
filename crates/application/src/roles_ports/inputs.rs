use std::collections::BTreeSet;

use staffdesk_domain::{ModulePermission, Role, RoleType};

/// Role returned to callers together with the employees currently holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Role aggregate.
    pub role: Role,
    /// Employee ids derived from the assignment list at read time.
    pub assigned_to: BTreeSet<String>,
}

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Role name, unique in the registry.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Role origin.
    pub role_type: RoleType,
    /// Permission rows, at most one per module.
    pub permissions: Vec<ModulePermission>,
    /// Approval ranking between 0 and 5.
    pub approval_authority_level: u8,
}

/// Input payload for partial role updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New role name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New approval ranking.
    pub approval_authority_level: Option<u8>,
}

/// Input payload for assigning a role to an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRoleInput {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Role identifier.
    pub role_id: String,
}
