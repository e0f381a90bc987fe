//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod permission;
mod role;

pub use access::EffectivePermissions;
pub use permission::{
    AppModule, DataScope, FieldAccessLevel, ModulePermission, PermissionAction,
    PermissionActions, PermissionSet,
};
pub use role::{
    ApprovalAuthorityLevel, NewRole, Role, RoleAssignment, RoleHistoryAction, RoleHistoryEntry,
    RoleType, RoleUpdate,
};
