use crate::{auth::auth::AuthUser, envelope::ApiResponse, error::AppError, navigation};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct PathQuery {
    /// Front-end route to check, e.g. `/hr/manager/attendance`
    pub path: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AccessDecision {
    #[schema(example = "/hr/manager/attendance")]
    pub path: String,
    pub allowed: bool,
}

/// Sidebar entries for the caller, in display order
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, description = "Ordered navigation; empty when the role/department has none", body = Object, example = json!({
            "success": true,
            "data": [
                { "name": "Dashboard", "path": "/hr/manager/dashboard", "icon": "dashboard" },
                { "name": "Employees", "path": "/hr/manager/employees", "icon": "users" }
            ]
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Navigation"
)]
pub async fn my_navigation(auth: AuthUser) -> HttpResponse {
    let entries = navigation::resolve(Some(auth.role), auth.department);
    HttpResponse::Ok().json(ApiResponse::ok(entries))
}

/// Whether the caller may open a front-end route
#[utoipa::path(
    get,
    path = "/api/navigation/authorize",
    params(PathQuery),
    responses(
        (status = 200, description = "Access decision", body = AccessDecision),
        (status = 400, description = "Path missing"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Navigation"
)]
pub async fn authorize_path(
    auth: AuthUser,
    query: web::Query<PathQuery>,
) -> Result<HttpResponse, AppError> {
    let path = query
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing("Path is required"))?;

    let allowed = navigation::can_access(Some(auth.role), auth.department, path);
    tracing::debug!(user_id = auth.user_id, path, allowed, "Route authorization");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AccessDecision {
        path: path.to_string(),
        allowed,
    })))
}
