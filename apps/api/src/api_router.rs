use axum::Router;
use axum::routing::{delete, get, post, put};
use staffdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let role_routes = Router::new()
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::roles::get_role_handler)
                .patch(handlers::roles::update_role_handler)
                .delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            put(handlers::roles::update_role_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/duplicate",
            post(handlers::roles::duplicate_role_handler),
        )
        .route(
            "/api/roles/{role_id}/assignments",
            get(handlers::roles::list_role_assignments_handler),
        );

    let assignment_routes = Router::new()
        .route(
            "/api/assignments",
            get(handlers::assignments::list_assignments_handler)
                .post(handlers::assignments::assign_role_handler),
        )
        .route(
            "/api/assignments/{assignment_id}",
            delete(handlers::assignments::unassign_role_handler),
        )
        .route(
            "/api/employees/{employee_id}/roles",
            get(handlers::employees::employee_roles_handler),
        )
        .route(
            "/api/employees/{employee_id}/effective-permissions",
            get(handlers::employees::effective_permissions_handler),
        )
        .route(
            "/api/employees/{employee_id}/access",
            get(handlers::employees::access_check_handler),
        )
        .route(
            "/api/employees/{employee_id}/field-access",
            get(handlers::employees::field_access_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(role_routes)
        .merge(assignment_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
