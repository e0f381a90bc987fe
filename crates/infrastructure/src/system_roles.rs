use staffdesk_application::CreateRoleInput;
use staffdesk_domain::{
    AppModule, DataScope, FieldAccessLevel, ModulePermission, PermissionAction,
    PermissionActions, RoleType,
};

use PermissionAction::{Approve, Create, Edit, View};

const PEOPLE_MODULES: [AppModule; 9] = [
    AppModule::Dashboard,
    AppModule::Employees,
    AppModule::Attendance,
    AppModule::LeaveManagement,
    AppModule::Payroll,
    AppModule::Performance,
    AppModule::Recruitment,
    AppModule::Documents,
    AppModule::Reports,
];

/// Built-in roles seeded into an empty registry.
#[must_use]
pub fn system_roles() -> Vec<CreateRoleInput> {
    vec![super_admin(), hr_admin(), manager(), employee()]
}

fn super_admin() -> CreateRoleInput {
    let permissions = AppModule::all()
        .iter()
        .map(|module| {
            ModulePermission::new(*module, PermissionActions::all(), DataScope::Organization)
                .with_confidential_access(true)
        })
        .collect();

    system_role(
        "Super Admin",
        "Unrestricted access to every module and setting",
        permissions,
        5,
    )
}

fn hr_admin() -> CreateRoleInput {
    let permissions = PEOPLE_MODULES
        .iter()
        .map(|module| {
            ModulePermission::new(*module, PermissionActions::all(), DataScope::Organization)
                .with_confidential_access(true)
        })
        .collect();

    system_role(
        "HR Admin",
        "Manages employee records, payroll and HR workflows across the organization",
        permissions,
        4,
    )
}

fn manager() -> CreateRoleInput {
    let permissions = vec![
        grant(AppModule::Dashboard, &[View], DataScope::Team),
        grant(AppModule::Employees, &[View], DataScope::Team)
            .with_field_access("salary", FieldAccessLevel::Hidden),
        grant(AppModule::Attendance, &[View, Approve], DataScope::Team),
        grant(AppModule::LeaveManagement, &[View, Approve], DataScope::Team),
        grant(AppModule::Performance, &[View, Create, Edit], DataScope::Team),
        grant(AppModule::Reports, &[View], DataScope::Team),
    ];

    system_role(
        "Manager",
        "Oversees a team and approves its leave and attendance",
        permissions,
        2,
    )
}

fn employee() -> CreateRoleInput {
    let permissions = vec![
        grant(AppModule::Dashboard, &[View], DataScope::SelfOnly),
        grant(AppModule::Employees, &[View], DataScope::SelfOnly)
            .with_field_access("bank_account", FieldAccessLevel::View),
        grant(AppModule::Attendance, &[View, Create], DataScope::SelfOnly),
        grant(AppModule::LeaveManagement, &[View, Create], DataScope::SelfOnly),
        grant(AppModule::Payroll, &[View], DataScope::SelfOnly),
        grant(AppModule::Documents, &[View, Create], DataScope::SelfOnly),
    ];

    system_role(
        "Employee",
        "Self-service access to personal records and requests",
        permissions,
        0,
    )
}

fn grant(module: AppModule, actions: &[PermissionAction], scope: DataScope) -> ModulePermission {
    ModulePermission::new(module, PermissionActions::only(actions), scope)
}

fn system_role(
    name: &str,
    description: &str,
    permissions: Vec<ModulePermission>,
    approval_authority_level: u8,
) -> CreateRoleInput {
    CreateRoleInput {
        name: name.to_owned(),
        description: description.to_owned(),
        role_type: RoleType::System,
        permissions,
        approval_authority_level,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use staffdesk_application::{AccessService, AssignRoleInput, RolesRegistry};
    use staffdesk_core::{ActorIdentity, AppError};
    use staffdesk_domain::{AppModule, DataScope, PermissionAction, RoleType};

    use super::system_roles;
    use crate::{InMemoryRoleStateStore, SequentialIdGenerator, SystemClock};

    async fn seeded_registry() -> (RolesRegistry, ActorIdentity) {
        let Ok(system) = ActorIdentity::new("System") else {
            panic!("actor fixture rejected");
        };
        let Ok(registry) = RolesRegistry::load(
            Arc::new(InMemoryRoleStateStore::new()),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(SystemClock),
        )
        .await
        else {
            panic!("registry failed to load");
        };
        let seeded = registry.seed_if_empty(system_roles(), &system).await;
        assert_eq!(seeded.ok(), Some(4));
        (registry, system)
    }

    #[test]
    fn every_seed_is_a_system_role() {
        let roles = system_roles();

        assert_eq!(roles.len(), 4);
        assert!(roles.iter().all(|role| role.role_type == RoleType::System));
        assert!(roles.iter().all(|role| role.approval_authority_level <= 5));
    }

    #[tokio::test]
    async fn seeded_roles_cannot_be_deleted() {
        let (registry, system) = seeded_registry().await;

        for definition in registry.list_roles().await {
            let deleted = registry.delete_role(definition.role.id(), &system).await;
            assert!(matches!(deleted, Err(AppError::Forbidden(_))));
        }
        assert_eq!(registry.list_roles().await.len(), 4);
    }

    #[tokio::test]
    async fn manager_and_employee_compose_to_team_scope_with_self_service() {
        let (registry, system) = seeded_registry().await;
        let roles = registry.list_roles().await;
        for name in ["Manager", "Employee"] {
            let Some(definition) = roles
                .iter()
                .find(|definition| definition.role.name().as_str() == name)
            else {
                panic!("missing seeded role {name}");
            };
            let assigned = registry
                .assign_role(
                    AssignRoleInput {
                        employee_id: "EMP-010".to_owned(),
                        employee_name: "Priya Raman".to_owned(),
                        role_id: definition.role.id().to_owned(),
                    },
                    &system,
                )
                .await;
            assert!(assigned.is_ok());
        }
        let access = AccessService::new(registry);

        let effective = access.effective_permissions("EMP-010").await;
        let Some(leave) = effective.get(AppModule::LeaveManagement) else {
            panic!("leave management missing from composition");
        };

        assert!(leave.actions.allows(PermissionAction::Create));
        assert!(leave.actions.allows(PermissionAction::Approve));
        assert_eq!(leave.scope, DataScope::Team);
        assert!(!access.can("EMP-010", AppModule::Payroll, PermissionAction::Edit).await);
        assert_eq!(access.highest_approval_level("EMP-010").await.value(), 2);
    }
}
