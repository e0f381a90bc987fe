use super::*;

pub async fn list_assignments_handler(
    State(state): State<AppState>,
) -> Json<Vec<RoleAssignmentResponse>> {
    let assignments = state
        .roles_registry
        .list_assignments()
        .await
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Json(assignments)
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    ApiJson(payload): ApiJson<AssignRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleAssignmentResponse>)> {
    let assignment = state
        .roles_registry
        .assign_role(payload.into(), &actor)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RoleAssignmentResponse::from(assignment)),
    ))
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    RequestActor(actor): RequestActor,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .roles_registry
        .unassign_role(assignment_id.as_str(), &actor)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
