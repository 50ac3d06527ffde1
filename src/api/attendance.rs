use crate::{
    auth::auth::AuthUser,
    envelope::ApiResponse,
    error::AppError,
    service::attendance::{self, DateQuery, UpsertAttendance},
    store::{AttendanceStore, UserDirectory},
};
use actix_web::{HttpResponse, web};

/// Department roster with each member's attendance for one day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DateQuery),
    responses(
        (status = 200, description = "Roster with attendance; missing records show as absent", body = Object, example = json!({
            "success": true,
            "data": {
                "date": "2026-03-02",
                "records": [{
                    "user": { "id": 7, "username": "jdoe", "full_name": "John Doe", "email": "john.doe@company.com", "role": "employee", "department": "hr", "is_active": true },
                    "attendance": { "userId": 7, "date": "2026-03-02", "status": "absent", "sessions": [], "totalHours": 0.0, "remarks": "" }
                }]
            }
        })),
        (status = 400, description = "Date missing or invalid", body = Object, example = json!({
            "success": false,
            "message": "Date is required"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Managers only"),
        (status = 500, description = "Storage failure", body = Object, example = json!({
            "success": false,
            "message": "Server error",
            "error": "pool timed out while waiting for an open connection"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn department_attendance(
    auth: AuthUser,
    users: web::Data<dyn UserDirectory>,
    records: web::Data<dyn AttendanceStore>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, AppError> {
    let department = auth.require_manager()?;
    let date = attendance::parse_date(query.date.as_deref())?;

    let data =
        attendance::department_daily(users.get_ref(), records.get_ref(), department, date).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// Create or replace one user's attendance for a day
#[utoipa::path(
    put,
    path = "/api/attendance/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User whose attendance is being set")
    ),
    request_body = UpsertAttendance,
    responses(
        (status = 200, description = "Attendance saved", body = Object, example = json!({
            "success": true,
            "message": "Attendance saved",
            "data": { "id": 12, "userId": 7, "date": "2026-03-02", "status": "present", "sessions": [{ "duration": 4.0 }], "totalHours": 4.0, "remarks": "Half day on site" }
        })),
        (status = 400, description = "Missing date/status or blank remarks", body = Object, example = json!({
            "success": false,
            "message": "Remarks are required when changing attendance"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Target not in the manager's department"),
        (status = 500, description = "Storage failure")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn upsert_attendance(
    auth: AuthUser,
    users: web::Data<dyn UserDirectory>,
    records: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
    payload: web::Json<UpsertAttendance>,
) -> Result<HttpResponse, AppError> {
    let department = auth.require_manager()?;
    let user_id = path.into_inner();

    let saved = attendance::upsert(
        users.get_ref(),
        records.get_ref(),
        department,
        user_id,
        payload.into_inner(),
    )
    .await
    .map_err(|e| {
        tracing::info!(error = %e, manager_id = auth.user_id, user_id, "Attendance update rejected");
        e
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message("Attendance saved", saved)))
}

/// One stored attendance record
#[utoipa::path(
    get,
    path = "/api/attendance/{user_id}/detail",
    params(
        ("user_id" = u64, Path, description = "User to look up"),
        DateQuery
    ),
    responses(
        (status = 200, description = "Stored record", body = Object),
        (status = 400, description = "Date missing or invalid"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Target not in the manager's department"),
        (status = 404, description = "No record for that day", body = Object, example = json!({
            "success": false,
            "message": "Attendance record not found"
        })),
        (status = 500, description = "Storage failure")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn attendance_detail(
    auth: AuthUser,
    users: web::Data<dyn UserDirectory>,
    records: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, AppError> {
    let department = auth.require_manager()?;
    let user_id = path.into_inner();
    let date = attendance::parse_date(query.date.as_deref())?;

    let record =
        attendance::detail(users.get_ref(), records.get_ref(), department, user_id, date).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(record)))
}
