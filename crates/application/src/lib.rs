//! Application services and ports.

#![forbid(unsafe_code)]

mod access_service;
mod roles_ports;
mod roles_registry;

#[cfg(test)]
mod test_support;

pub use access_service::AccessService;
pub use roles_ports::{
    AssignRoleInput, Clock, CreateRoleInput, IdGenerator, IdKind, RoleDefinition,
    RoleRegistrySnapshot, RoleStateStore, UpdateRoleInput,
};
pub use roles_registry::RolesRegistry;
