mod inputs;
mod repositories;
mod runtime;
mod snapshot;

pub use inputs::{AssignRoleInput, CreateRoleInput, RoleDefinition, UpdateRoleInput};
pub use repositories::RoleStateStore;
pub use runtime::{Clock, IdGenerator, IdKind};
pub use snapshot::RoleRegistrySnapshot;
