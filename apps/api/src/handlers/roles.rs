use staffdesk_core::AppError;

use super::*;

pub async fn list_roles_handler(State(state): State<AppState>) -> Json<Vec<RoleResponse>> {
    let roles = state
        .roles_registry
        .list_roles()
        .await
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Json(roles)
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .roles_registry
        .get_role_by_id(role_id.as_str())
        .await
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .roles_registry
        .create_role(payload.into(), &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    Path(role_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .roles_registry
        .update_role(role_id.as_str(), payload.into(), &actor)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn update_role_permissions_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    Path(role_id): Path<String>,
    ApiJson(payload): ApiJson<UpdatePermissionsRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .roles_registry
        .update_permissions(role_id.as_str(), payload.permissions, &actor)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .roles_registry
        .delete_role(role_id.as_str(), &actor)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    Path(role_id): Path<String>,
    ApiJson(payload): ApiJson<DuplicateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .roles_registry
        .duplicate_role(role_id.as_str(), payload.name.as_str(), &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn list_role_assignments_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let assignments = state
        .roles_registry
        .list_role_assignments(role_id.as_str())
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}
