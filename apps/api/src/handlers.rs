use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::auth::RequestActor;
use crate::dto::{
    AccessCheckQuery, AccessCheckResponse, AssignRoleRequest, CreateRoleRequest,
    DuplicateRoleRequest, EffectivePermissionsResponse, FieldAccessQuery, FieldAccessResponse,
    RoleAssignmentResponse, RoleResponse, UpdatePermissionsRequest, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub mod assignments;
pub mod employees;
pub mod health;
pub mod roles;
