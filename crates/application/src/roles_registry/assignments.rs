use tracing::{debug, info};

use staffdesk_core::{ActorIdentity, AppError, AppResult, NonEmptyString};
use staffdesk_domain::RoleAssignment;

use super::RolesRegistry;
use super::roles::missing_role;
use crate::roles_ports::{AssignRoleInput, IdKind};

impl RolesRegistry {
    /// Binds an employee to a role.
    ///
    /// Fails with `NotFound` for an unknown role and `Conflict` when the employee
    /// already holds the role.
    pub async fn assign_role(
        &self,
        input: AssignRoleInput,
        assigned_by: &ActorIdentity,
    ) -> AppResult<RoleAssignment> {
        let employee_id = NonEmptyString::for_field("employee_id", input.employee_id)?;
        let employee_name = NonEmptyString::for_field("employee_name", input.employee_name)?;
        let role_id = input.role_id;

        let assignment = self
            .mutate(|state| {
                let role = state
                    .role(role_id.as_str())
                    .ok_or_else(|| missing_role(role_id.as_str()))?;

                if state
                    .assignments
                    .iter()
                    .any(|existing| existing.binds(employee_id.as_str(), role.id()))
                {
                    return Err(AppError::Conflict(format!(
                        "employee '{}' already holds role '{}'",
                        employee_id,
                        role.name()
                    )));
                }

                let assignment = RoleAssignment::new(
                    self.fresh_id(state, IdKind::Assignment)?,
                    employee_id,
                    employee_name,
                    role,
                    assigned_by,
                    self.clock.now(),
                );
                state.assignments.push(assignment.clone());
                Ok(assignment)
            })
            .await?;

        info!(
            assignment_id = %assignment.id(),
            employee_id = %assignment.employee_id(),
            role_id = %assignment.role_id(),
            actor = %assigned_by,
            "role assigned"
        );
        Ok(assignment)
    }

    /// Removes an assignment; unknown ids are a no-op.
    pub async fn unassign_role(&self, assignment_id: &str, actor: &ActorIdentity) -> AppResult<()> {
        let mut guard = self.state.write().await;
        let Some(position) = guard
            .assignments
            .iter()
            .position(|assignment| assignment.id() == assignment_id)
        else {
            debug!(assignment_id, "unassign skipped, assignment does not exist");
            return Ok(());
        };

        let mut next = guard.clone();
        let removed = next.assignments.remove(position);
        self.commit(&mut guard, next).await?;

        info!(
            assignment_id,
            employee_id = %removed.employee_id(),
            role_id = %removed.role_id(),
            actor = %actor,
            "role unassigned"
        );
        Ok(())
    }
}
