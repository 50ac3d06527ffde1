use crate::api::navigation::AccessDecision;
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, Session},
    department::Department,
    navigation::{IconRef, NavigationEntry},
    role::Role,
    user::User,
};
use crate::models::{LoginReqDto, RegisterReq, TokenPair};
use crate::service::attendance::{DepartmentAttendance, UpsertAttendance, UserAttendance};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Department Workspace API",
        version = "1.0.0",
        description = r#"
## Department Workspace

Backend for the internal HR / IoT / Software / Financial / Business workspace.

### 🔹 Key Features
- **Navigation**
  - Ordered sidebar entries per role and department
  - Route authorization derived from the same table
- **Attendance**
  - Daily department roster; members without a record show as absent
  - Create or replace a member's attendance for a day (remarks mandatory)
  - Look up a single stored record

### 🔐 Security
`/api` endpoints require a **JWT Bearer** access token.
Attendance endpoints are limited to **managers** acting on their own department.

### 📦 Response Format
`{ "success": bool, "message"?: string, "data"?: any, "error"?: string }`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::navigation::my_navigation,
        crate::api::navigation::authorize_path,

        crate::api::attendance::department_attendance,
        crate::api::attendance::upsert_attendance,
        crate::api::attendance::attendance_detail
    ),
    components(
        schemas(
            RegisterReq,
            LoginReqDto,
            TokenPair,
            Role,
            Department,
            User,
            IconRef,
            NavigationEntry,
            AccessDecision,
            AttendanceStatus,
            Session,
            AttendanceRecord,
            UpsertAttendance,
            UserAttendance,
            DepartmentAttendance
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and token APIs"),
        (name = "Navigation", description = "Role/department navigation APIs"),
        (name = "Attendance", description = "Department attendance APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_attendance_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/attendance",
            "/api/attendance/{user_id}",
            "/api/attendance/{user_id}/detail",
            "/api/navigation",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
