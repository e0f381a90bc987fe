mod access;
mod common;
mod roles;

pub use access::{
    AccessCheckQuery, AccessCheckResponse, EffectivePermissionsResponse, FieldAccessQuery,
    FieldAccessResponse,
};
pub use common::HealthResponse;
pub use roles::{
    AssignRoleRequest, CreateRoleRequest, DuplicateRoleRequest, RoleAssignmentResponse,
    RoleResponse, UpdatePermissionsRequest, UpdateRoleRequest,
};
