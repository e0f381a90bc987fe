use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staffdesk_domain::{ModulePermission, RoleHistoryEntry, RoleType};

mod conversions;

/// Incoming payload for role creation.
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub role_type: Option<RoleType>,
    #[serde(default)]
    pub permissions: Vec<ModulePermission>,
    #[serde(default)]
    pub approval_authority_level: u8,
}

/// Incoming payload for partial role updates.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub approval_authority_level: Option<u8>,
}

/// Incoming payload replacing a role's permission matrix.
#[derive(Debug, Deserialize)]
pub struct UpdatePermissionsRequest {
    pub permissions: Vec<ModulePermission>,
}

/// Incoming payload for cloning a role.
#[derive(Debug, Deserialize)]
pub struct DuplicateRoleRequest {
    pub name: String,
}

/// Incoming payload for role assignment.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub employee_id: String,
    pub employee_name: String,
    pub role_id: String,
}

/// API representation of a role with its current holders.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub role_type: RoleType,
    pub permissions: Vec<ModulePermission>,
    pub approval_authority_level: u8,
    pub assigned_to: Vec<String>,
    pub history: Vec<RoleHistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API representation of a role assignment.
#[derive(Debug, Serialize)]
pub struct RoleAssignmentResponse {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub role_id: String,
    pub role_name: String,
    pub assigned_by: String,
    pub assigned_at: DateTime<Utc>,
}
