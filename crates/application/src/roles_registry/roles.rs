use tracing::{info, warn};

use staffdesk_core::{ActorIdentity, AppError, AppResult, NonEmptyString};
use staffdesk_domain::{
    ApprovalAuthorityLevel, ModulePermission, NewRole, PermissionSet, Role, RoleUpdate,
};

use super::RolesRegistry;
use crate::roles_ports::{
    CreateRoleInput, IdKind, RoleDefinition, RoleRegistrySnapshot, UpdateRoleInput,
};

pub(super) fn validate_new_role(input: CreateRoleInput) -> AppResult<NewRole> {
    Ok(NewRole {
        name: NonEmptyString::for_field("role name", input.name.trim())?,
        description: input.description,
        role_type: input.role_type,
        permissions: PermissionSet::new(input.permissions)?,
        approval_authority_level: ApprovalAuthorityLevel::new(input.approval_authority_level)?,
    })
}

fn validate_update(input: UpdateRoleInput) -> AppResult<RoleUpdate> {
    let update = RoleUpdate {
        name: input
            .name
            .map(|name| NonEmptyString::for_field("role name", name.trim()))
            .transpose()?,
        description: input.description,
        approval_authority_level: input
            .approval_authority_level
            .map(ApprovalAuthorityLevel::new)
            .transpose()?,
    };

    if update.is_empty() {
        return Err(AppError::Validation(
            "role update must set at least one field".to_owned(),
        ));
    }

    Ok(update)
}

impl RolesRegistry {
    /// Creates a role with an empty holder set and a single `Created` history entry.
    pub async fn create_role(
        &self,
        input: CreateRoleInput,
        actor: &ActorIdentity,
    ) -> AppResult<RoleDefinition> {
        let input = validate_new_role(input)?;
        let created = self
            .mutate(|state| self.insert_role(state, input, actor))
            .await?;

        info!(
            role_id = %created.role.id(),
            role_name = %created.role.name(),
            actor = %actor,
            "role created"
        );
        Ok(created)
    }

    /// Applies a partial update of name, description or approval level.
    pub async fn update_role(
        &self,
        role_id: &str,
        input: UpdateRoleInput,
        actor: &ActorIdentity,
    ) -> AppResult<RoleDefinition> {
        let update = validate_update(input)?;
        let renamed = update.name.is_some();

        let updated = self
            .mutate(|state| {
                if let Some(name) = &update.name {
                    state.role(role_id).ok_or_else(|| missing_role(role_id))?;
                    state.ensure_name_available(name.as_str(), Some(role_id))?;
                }

                let now = self.clock.now();
                let role = state.role_mut(role_id)?;
                role.apply_update(update, actor, now)?;
                let role = role.clone();

                if renamed {
                    for assignment in &mut state.assignments {
                        assignment.refresh_role_name(&role);
                    }
                }

                Ok(state.definition(&role))
            })
            .await?;

        info!(role_id, actor = %actor, "role updated");
        Ok(updated)
    }

    /// Replaces a role's permission matrix wholesale.
    pub async fn update_permissions(
        &self,
        role_id: &str,
        permissions: Vec<ModulePermission>,
        actor: &ActorIdentity,
    ) -> AppResult<RoleDefinition> {
        let permissions = PermissionSet::new(permissions)?;
        let module_count = permissions.len();

        let updated = self
            .mutate(|state| {
                let now = self.clock.now();
                let role = state.role_mut(role_id)?;
                role.replace_permissions(permissions, actor, now);
                let role = role.clone();
                Ok(state.definition(&role))
            })
            .await?;

        info!(role_id, module_count, actor = %actor, "role permissions changed");
        Ok(updated)
    }

    /// Deletes a custom role together with every assignment referencing it.
    ///
    /// System roles are refused with `Forbidden` and nothing changes.
    pub async fn delete_role(&self, role_id: &str, actor: &ActorIdentity) -> AppResult<()> {
        let result = self
            .mutate(|state| {
                let role = state.role(role_id).ok_or_else(|| missing_role(role_id))?;
                role.ensure_deletable()?;

                state.roles.retain(|role| role.id() != role_id);
                let before = state.assignments.len();
                state
                    .assignments
                    .retain(|assignment| assignment.role_id() != role_id);
                Ok(before - state.assignments.len())
            })
            .await;

        match result {
            Ok(removed_assignments) => {
                info!(role_id, removed_assignments, actor = %actor, "role deleted");
                Ok(())
            }
            Err(error @ AppError::Forbidden(_)) => {
                warn!(role_id, actor = %actor, "refused to delete system role");
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    /// Copies a role into a new custom role with its own history.
    pub async fn duplicate_role(
        &self,
        role_id: &str,
        name: &str,
        actor: &ActorIdentity,
    ) -> AppResult<RoleDefinition> {
        let name = NonEmptyString::for_field("role name", name.trim())?;

        let created = self
            .mutate(|state| {
                let source = state.role(role_id).ok_or_else(|| missing_role(role_id))?;
                state.ensure_name_available(name.as_str(), None)?;

                let id = self.fresh_id(state, IdKind::Role)?;
                let copy = source.duplicate(id, name, actor, self.clock.now());
                let definition = state.definition(&copy);
                state.roles.push(copy);
                Ok(definition)
            })
            .await?;

        info!(
            source_role_id = role_id,
            role_id = %created.role.id(),
            actor = %actor,
            "role duplicated"
        );
        Ok(created)
    }

    pub(super) fn insert_role(
        &self,
        state: &mut RoleRegistrySnapshot,
        input: NewRole,
        actor: &ActorIdentity,
    ) -> AppResult<RoleDefinition> {
        state.ensure_name_available(input.name.as_str(), None)?;

        let role = Role::create(
            self.fresh_id(state, IdKind::Role)?,
            input,
            actor,
            self.clock.now(),
        );
        let definition = state.definition(&role);
        state.roles.push(role);
        Ok(definition)
    }
}

pub(super) fn missing_role(role_id: &str) -> AppError {
    AppError::NotFound(format!("role '{role_id}' does not exist"))
}
