use std::str::FromStr;

use staffdesk_domain::{AppModule, DataScope, PermissionAction};

use super::*;

pub async fn employee_roles_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Json<Vec<RoleResponse>> {
    let roles = state
        .roles_registry
        .get_roles_by_employee(employee_id.as_str())
        .await
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Json(roles)
}

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Json<EffectivePermissionsResponse> {
    let permissions = state
        .access_service
        .effective_permissions(employee_id.as_str())
        .await;
    let highest_approval_level = state
        .access_service
        .highest_approval_level(employee_id.as_str())
        .await;

    Json(EffectivePermissionsResponse::new(
        employee_id,
        permissions,
        highest_approval_level,
    ))
}

pub async fn access_check_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    ApiQuery(query): ApiQuery<AccessCheckQuery>,
) -> ApiResult<Json<AccessCheckResponse>> {
    let module = AppModule::from_str(query.module.as_str())?;
    let action = PermissionAction::from_str(query.action.as_str())?;
    let scope = query
        .scope
        .as_deref()
        .map(DataScope::from_str)
        .transpose()?;

    let allowed = match scope {
        Some(scope) => {
            state
                .access_service
                .can_within(employee_id.as_str(), module, action, scope)
                .await
        }
        None => {
            state
                .access_service
                .can(employee_id.as_str(), module, action)
                .await
        }
    };

    Ok(Json(AccessCheckResponse {
        employee_id,
        module,
        action,
        scope,
        allowed,
    }))
}

pub async fn field_access_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    ApiQuery(query): ApiQuery<FieldAccessQuery>,
) -> ApiResult<Json<FieldAccessResponse>> {
    let module = AppModule::from_str(query.module.as_str())?;
    let access = state
        .access_service
        .field_access(employee_id.as_str(), module, query.field.as_str())
        .await;

    Ok(Json(FieldAccessResponse {
        employee_id,
        module,
        field: query.field,
        access,
    }))
}
