//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod id_generators;
mod in_memory_role_state_store;
mod json_file_role_state_store;
mod system_clock;
mod system_roles;

pub use id_generators::{SequentialIdGenerator, UuidIdGenerator};
pub use in_memory_role_state_store::InMemoryRoleStateStore;
pub use json_file_role_state_store::JsonFileRoleStateStore;
pub use system_clock::SystemClock;
pub use system_roles::system_roles;
