use staffdesk_application::{AssignRoleInput, CreateRoleInput, RoleDefinition, UpdateRoleInput};
use staffdesk_domain::{RoleAssignment, RoleType};

use super::{
    AssignRoleRequest, CreateRoleRequest, RoleAssignmentResponse, RoleResponse, UpdateRoleRequest,
};

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            role_type: value.role_type.unwrap_or(RoleType::Custom),
            permissions: value.permissions,
            approval_authority_level: value.approval_authority_level,
        }
    }
}

impl From<UpdateRoleRequest> for UpdateRoleInput {
    fn from(value: UpdateRoleRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            approval_authority_level: value.approval_authority_level,
        }
    }
}

impl From<AssignRoleRequest> for AssignRoleInput {
    fn from(value: AssignRoleRequest) -> Self {
        Self {
            employee_id: value.employee_id,
            employee_name: value.employee_name,
            role_id: value.role_id,
        }
    }
}

impl From<RoleDefinition> for RoleResponse {
    fn from(value: RoleDefinition) -> Self {
        let role = value.role;
        Self {
            id: role.id().to_owned(),
            name: role.name().as_str().to_owned(),
            description: role.description().to_owned(),
            role_type: role.role_type(),
            permissions: role.permissions().as_slice().to_vec(),
            approval_authority_level: role.approval_authority_level().value(),
            assigned_to: value.assigned_to.into_iter().collect(),
            history: role.history().to_vec(),
            created_at: role.created_at(),
            updated_at: role.updated_at(),
        }
    }
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(value: RoleAssignment) -> Self {
        Self {
            id: value.id().to_owned(),
            employee_id: value.employee_id().to_owned(),
            employee_name: value.employee_name().to_owned(),
            role_id: value.role_id().to_owned(),
            role_name: value.role_name().to_owned(),
            assigned_by: value.assigned_by().to_owned(),
            assigned_at: value.assigned_at(),
        }
    }
}
