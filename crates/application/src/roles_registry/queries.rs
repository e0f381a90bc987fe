use std::collections::HashSet;

use staffdesk_core::AppResult;
use staffdesk_domain::RoleAssignment;

use super::RolesRegistry;
use super::roles::missing_role;
use crate::roles_ports::RoleDefinition;

impl RolesRegistry {
    /// Returns a role by id.
    pub async fn get_role_by_id(&self, role_id: &str) -> Option<RoleDefinition> {
        let state = self.state.read().await;
        Self::definition_of(&state, role_id)
    }

    /// Returns every role in creation order.
    pub async fn list_roles(&self) -> Vec<RoleDefinition> {
        let state = self.state.read().await;
        state
            .roles
            .iter()
            .map(|role| state.definition(role))
            .collect()
    }

    /// Returns every assignment in creation order.
    pub async fn list_assignments(&self) -> Vec<RoleAssignment> {
        self.state.read().await.assignments.clone()
    }

    /// Returns the assignments of one role.
    pub async fn list_role_assignments(&self, role_id: &str) -> AppResult<Vec<RoleAssignment>> {
        let state = self.state.read().await;
        state.role(role_id).ok_or_else(|| missing_role(role_id))?;

        Ok(state
            .assignments
            .iter()
            .filter(|assignment| assignment.role_id() == role_id)
            .cloned()
            .collect())
    }

    /// Returns the distinct roles an employee holds, in role creation order.
    pub async fn get_roles_by_employee(&self, employee_id: &str) -> Vec<RoleDefinition> {
        let state = self.state.read().await;
        let held: HashSet<&str> = state
            .assignments
            .iter()
            .filter(|assignment| assignment.employee_id() == employee_id)
            .map(|assignment| assignment.role_id())
            .collect();

        state
            .roles
            .iter()
            .filter(|role| held.contains(role.id()))
            .map(|role| state.definition(role))
            .collect()
    }
}
