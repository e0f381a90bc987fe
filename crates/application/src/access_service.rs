use staffdesk_core::{AppError, AppResult};
use staffdesk_domain::{
    AppModule, ApprovalAuthorityLevel, DataScope, EffectivePermissions, FieldAccessLevel,
    PermissionAction,
};

use crate::RolesRegistry;

/// Resolves what an employee may do by composing every role they hold.
#[derive(Clone)]
pub struct AccessService {
    registry: RolesRegistry,
}

impl AccessService {
    /// Creates a new access service over the roles registry.
    #[must_use]
    pub fn new(registry: RolesRegistry) -> Self {
        Self { registry }
    }

    /// Returns the composed permissions of an employee.
    pub async fn effective_permissions(&self, employee_id: &str) -> EffectivePermissions {
        let held = self.registry.get_roles_by_employee(employee_id).await;
        EffectivePermissions::compose(held.iter().map(|definition| &definition.role))
    }

    /// Returns whether the employee may perform the action on the module.
    pub async fn can(&self, employee_id: &str, module: AppModule, action: PermissionAction) -> bool {
        self.effective_permissions(employee_id)
            .await
            .allows(module, action)
    }

    /// Returns whether the employee may perform the action over records of `scope`.
    pub async fn can_within(
        &self,
        employee_id: &str,
        module: AppModule,
        action: PermissionAction,
        scope: DataScope,
    ) -> bool {
        self.effective_permissions(employee_id)
            .await
            .allows_within(module, action, scope)
    }

    /// Ensures the employee may perform the action on the module.
    pub async fn require(
        &self,
        employee_id: &str,
        module: AppModule,
        action: PermissionAction,
    ) -> AppResult<()> {
        if self.can(employee_id, module, action).await {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "employee '{employee_id}' is missing '{}' on module '{module}'",
            action.as_str()
        )))
    }

    /// Resolves the access verdict for one field of a module.
    pub async fn field_access(
        &self,
        employee_id: &str,
        module: AppModule,
        field: &str,
    ) -> FieldAccessLevel {
        self.effective_permissions(employee_id)
            .await
            .field_access(module, field)
    }

    /// Returns the highest approval authority across the employee's roles.
    pub async fn highest_approval_level(&self, employee_id: &str) -> ApprovalAuthorityLevel {
        self.registry
            .get_roles_by_employee(employee_id)
            .await
            .iter()
            .map(|definition| definition.role.approval_authority_level())
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use staffdesk_core::AppError;
    use staffdesk_domain::{
        AppModule, DataScope, FieldAccessLevel, PermissionAction, RoleType,
    };

    use crate::roles_ports::AssignRoleInput;
    use crate::test_support::{FakeStateStore, actor, registry_with_store, role_input, row};
    use crate::RolesRegistry;

    use super::AccessService;

    async fn grant(
        registry: &RolesRegistry,
        employee_id: &str,
        name: &str,
        level: u8,
        rows: Vec<staffdesk_domain::ModulePermission>,
    ) {
        let mut input = role_input(name, RoleType::Custom, rows);
        input.approval_authority_level = level;
        let admin = actor("HR Admin");
        let Ok(role) = registry.create_role(input, &admin).await else {
            panic!("role fixture rejected");
        };
        let assigned = registry
            .assign_role(
                AssignRoleInput {
                    employee_id: employee_id.to_owned(),
                    employee_name: "Jane Doe".to_owned(),
                    role_id: role.role.id().to_owned(),
                },
                &admin,
            )
            .await;
        assert!(assigned.is_ok());
    }

    async fn service() -> (AccessService, RolesRegistry) {
        let registry = registry_with_store(Arc::new(FakeStateStore::default())).await;
        (AccessService::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn composes_actions_and_scope_across_held_roles() {
        let (service, registry) = service().await;
        grant(
            &registry,
            "EMP-900",
            "Viewer",
            1,
            vec![row(AppModule::Payroll, &[PermissionAction::View], DataScope::Team)],
        )
        .await;
        grant(
            &registry,
            "EMP-900",
            "Creator",
            3,
            vec![row(
                AppModule::Payroll,
                &[PermissionAction::Create],
                DataScope::Organization,
            )],
        )
        .await;

        let effective = service.effective_permissions("EMP-900").await;

        assert!(effective.allows(AppModule::Payroll, PermissionAction::View));
        assert!(effective.allows(AppModule::Payroll, PermissionAction::Create));
        assert_eq!(
            effective.get(AppModule::Payroll).map(|row| row.scope),
            Some(DataScope::Organization)
        );
        assert_eq!(service.highest_approval_level("EMP-900").await.value(), 3);
        assert!(
            service
                .can_within(
                    "EMP-900",
                    AppModule::Payroll,
                    PermissionAction::View,
                    DataScope::Organization
                )
                .await
        );
    }

    #[tokio::test]
    async fn require_rejects_missing_action() {
        let (service, registry) = service().await;
        grant(
            &registry,
            "EMP-1",
            "Viewer",
            0,
            vec![row(AppModule::Reports, &[PermissionAction::View], DataScope::Team)],
        )
        .await;

        assert!(
            service
                .require("EMP-1", AppModule::Reports, PermissionAction::View)
                .await
                .is_ok()
        );
        assert!(matches!(
            service
                .require("EMP-1", AppModule::Reports, PermissionAction::Delete)
                .await,
            Err(AppError::Forbidden(_))
        ));
        assert!(
            !service
                .can("EMP-1", AppModule::Settings, PermissionAction::View)
                .await
        );
        assert!(
            !service
                .can_within(
                    "EMP-1",
                    AppModule::Reports,
                    PermissionAction::View,
                    DataScope::Department
                )
                .await
        );
    }

    #[tokio::test]
    async fn employee_without_roles_has_no_access() {
        let (service, _) = service().await;

        assert!(service.effective_permissions("EMP-404").await.is_empty());
        assert_eq!(service.highest_approval_level("EMP-404").await.value(), 0);
        assert_eq!(
            service
                .field_access("EMP-404", AppModule::Employees, "salary")
                .await,
            FieldAccessLevel::Hidden
        );
    }

    #[tokio::test]
    async fn field_access_falls_back_to_composed_actions() {
        let (service, registry) = service().await;
        grant(
            &registry,
            "EMP-2",
            "Profile Editor",
            0,
            vec![
                row(
                    AppModule::Employees,
                    &[PermissionAction::View, PermissionAction::Edit],
                    DataScope::Department,
                )
                .with_field_access("national_id", FieldAccessLevel::View),
            ],
        )
        .await;

        assert_eq!(
            service
                .field_access("EMP-2", AppModule::Employees, "national_id")
                .await,
            FieldAccessLevel::View
        );
        assert_eq!(
            service
                .field_access("EMP-2", AppModule::Employees, "phone")
                .await,
            FieldAccessLevel::Edit
        );
    }

    #[tokio::test]
    async fn unassigning_revokes_effective_permissions() {
        let (service, registry) = service().await;
        grant(
            &registry,
            "EMP-3",
            "Viewer",
            0,
            vec![row(AppModule::Assets, &[PermissionAction::View], DataScope::SelfOnly)],
        )
        .await;
        let assignments = registry.list_assignments().await;
        let removed = registry
            .unassign_role(assignments[0].id(), &actor("HR Admin"))
            .await;

        assert!(removed.is_ok());
        assert!(
            !service
                .can("EMP-3", AppModule::Assets, PermissionAction::View)
                .await
        );
    }
}
