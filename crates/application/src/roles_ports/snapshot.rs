use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use staffdesk_core::{AppError, AppResult};
use staffdesk_domain::{Role, RoleAssignment};

use super::inputs::RoleDefinition;
use super::runtime::IdKind;

/// Persisted state of the roles registry: every role and every assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistrySnapshot {
    /// Roles in creation order.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Assignments in creation order.
    #[serde(default)]
    pub assignments: Vec<RoleAssignment>,
}

impl RoleRegistrySnapshot {
    /// Checks referential integrity of a loaded snapshot.
    pub fn validate(&self) -> AppResult<()> {
        let mut role_ids = HashSet::new();
        let mut role_names = HashSet::new();
        for role in &self.roles {
            if !role_ids.insert(role.id()) {
                return Err(AppError::Validation(format!(
                    "snapshot contains role id '{}' more than once",
                    role.id()
                )));
            }
            if !role_names.insert(role.name().as_str().trim().to_lowercase()) {
                return Err(AppError::Validation(format!(
                    "snapshot contains role name '{}' more than once",
                    role.name()
                )));
            }
            if role.history().is_empty() {
                return Err(AppError::Validation(format!(
                    "role '{}' has no history",
                    role.id()
                )));
            }
        }

        let mut assignment_ids = HashSet::new();
        let mut bindings = HashSet::new();
        for assignment in &self.assignments {
            if !assignment_ids.insert(assignment.id()) {
                return Err(AppError::Validation(format!(
                    "snapshot contains assignment id '{}' more than once",
                    assignment.id()
                )));
            }
            if !role_ids.contains(assignment.role_id()) {
                return Err(AppError::Validation(format!(
                    "assignment '{}' references missing role '{}'",
                    assignment.id(),
                    assignment.role_id()
                )));
            }
            if !bindings.insert((assignment.employee_id(), assignment.role_id())) {
                return Err(AppError::Validation(format!(
                    "employee '{}' is assigned role '{}' more than once",
                    assignment.employee_id(),
                    assignment.role_id()
                )));
            }
        }

        Ok(())
    }

    /// Returns a role by id.
    #[must_use]
    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id() == role_id)
    }

    /// Returns a mutable role by id, or `NotFound`.
    pub fn role_mut(&mut self, role_id: &str) -> AppResult<&mut Role> {
        self.roles
            .iter_mut()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Returns whether a role or assignment already uses `id`.
    #[must_use]
    pub fn contains_id(&self, kind: IdKind, id: &str) -> bool {
        match kind {
            IdKind::Role => self.roles.iter().any(|role| role.id() == id),
            IdKind::Assignment => self
                .assignments
                .iter()
                .any(|assignment| assignment.id() == id),
        }
    }

    /// Returns the employees holding a role.
    #[must_use]
    pub fn assigned_to(&self, role_id: &str) -> BTreeSet<String> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.role_id() == role_id)
            .map(|assignment| assignment.employee_id().to_owned())
            .collect()
    }

    /// Projects a role with its derived holders.
    #[must_use]
    pub fn definition(&self, role: &Role) -> RoleDefinition {
        RoleDefinition {
            role: role.clone(),
            assigned_to: self.assigned_to(role.id()),
        }
    }

    /// Fails with `Conflict` when another role already uses `name`.
    pub fn ensure_name_available(&self, name: &str, except_role_id: Option<&str>) -> AppResult<()> {
        let taken = self
            .roles
            .iter()
            .any(|role| Some(role.id()) != except_role_id && role.has_name(name));
        if taken {
            return Err(AppError::Conflict(format!(
                "a role named '{}' already exists",
                name.trim()
            )));
        }

        Ok(())
    }
}
