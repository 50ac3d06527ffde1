//! Department attendance: daily roster view, per-user upsert and detail.
//!
//! Every operation is scoped to the acting manager's department and keyed by
//! a normalized calendar day.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    model::{
        attendance::{AttendanceRecord, AttendanceStatus, Session},
        department::Department,
        role::Role,
        user::User,
    },
    store::{AttendanceStore, UserDirectory},
    utils::date::normalize_date,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Day to look up; any time-of-day component is ignored
    #[param(example = "2026-03-02")]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAttendance {
    #[schema(example = "2026-03-02")]
    pub date: Option<String>,
    #[schema(example = "present")]
    pub status: Option<String>,
    #[schema(example = "Worked from the Dhaka office")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Fully checked upsert input.
#[derive(Debug)]
struct ValidUpsert {
    date: NaiveDate,
    status: AttendanceStatus,
    remarks: String,
    sessions: Vec<Session>,
}

impl UpsertAttendance {
    /// Checks run in order and the first failure is reported.
    fn validate(self) -> Result<ValidUpsert, AppError> {
        let (Some(date), Some(status)) = (
            self.date.as_deref().filter(|d| !d.trim().is_empty()),
            self.status.as_deref().filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(AppError::missing("Date and status are required"));
        };
        let date = normalize_date(date).ok_or_else(|| AppError::missing("Invalid date"))?;

        let remarks = self.remarks.as_deref().map(str::trim).unwrap_or_default();
        if remarks.is_empty() {
            return Err(AppError::validation(
                "Remarks are required when changing attendance",
            ));
        }

        let status = status
            .trim()
            .to_lowercase()
            .parse::<AttendanceStatus>()
            .map_err(|_| AppError::validation(format!("Unknown attendance status '{status}'")))?;

        Ok(ValidUpsert {
            date,
            status,
            remarks: remarks.to_string(),
            sessions: self.sessions,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserAttendance {
    pub user: User,
    pub attendance: AttendanceRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentAttendance {
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub records: Vec<UserAttendance>,
}

pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => {
            normalize_date(raw).ok_or_else(|| AppError::missing("Invalid date"))
        }
        _ => Err(AppError::missing("Date is required")),
    }
}

/// Target must exist and sit in the manager's department. Both failures
/// look the same to the caller.
async fn department_member(
    users: &dyn UserDirectory,
    department: Department,
    user_id: u64,
) -> Result<User, AppError> {
    match users.find_by_id(user_id).await? {
        Some(user) if user.belongs_to(department) => Ok(user),
        _ => Err(AppError::denied("Access denied")),
    }
}

/// Every employee and intern of `department`, each paired with their record
/// for `date` or a synthesized absent record. Nothing is written.
pub async fn department_daily(
    users: &dyn UserDirectory,
    attendance: &dyn AttendanceStore,
    department: Department,
    date: NaiveDate,
) -> Result<DepartmentAttendance, AppError> {
    let roster = users.list_by_department(department, &Role::ROSTER).await?;
    let ids: Vec<u64> = roster.iter().map(|u| u.id).collect();

    let mut by_user: HashMap<u64, AttendanceRecord> = attendance
        .find_for_users(&ids, date)
        .await?
        .into_iter()
        .map(|r| (r.user_id, r))
        .collect();

    debug!(%department, %date, roster = roster.len(), found = by_user.len(), "Composed daily attendance");

    let records = roster
        .into_iter()
        .map(|user| {
            let attendance = by_user
                .remove(&user.id)
                .unwrap_or_else(|| AttendanceRecord::absent(user.id, date));
            UserAttendance { user, attendance }
        })
        .collect();

    Ok(DepartmentAttendance { date, records })
}

/// Creates or overwrites `user_id`'s record for the requested day.
pub async fn upsert(
    users: &dyn UserDirectory,
    attendance: &dyn AttendanceStore,
    department: Department,
    user_id: u64,
    request: UpsertAttendance,
) -> Result<AttendanceRecord, AppError> {
    let input = request.validate()?;
    department_member(users, department, user_id).await?;

    let mut record = attendance
        .find_one(user_id, input.date)
        .await?
        .unwrap_or_else(|| AttendanceRecord::new(user_id, input.date));
    let created = record.id.is_none();

    record.apply(input.status, input.remarks, input.sessions);
    let saved = attendance.save(record).await?;

    info!(
        user_id,
        %department,
        date = %saved.date,
        status = %saved.status,
        total_hours = saved.total_hours,
        created,
        "Attendance saved"
    );

    Ok(saved)
}

/// Stored record for `(user_id, date)`. Unlike [`department_daily`], a missing
/// record is reported as not found.
pub async fn detail(
    users: &dyn UserDirectory,
    attendance: &dyn AttendanceStore,
    department: Department,
    user_id: u64,
    date: NaiveDate,
) -> Result<AttendanceRecord, AppError> {
    department_member(users, department, user_id).await?;

    attendance
        .find_one(user_id, date)
        .await?
        .ok_or_else(|| AppError::not_found("Attendance record not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::user::NewUser, store::memory::MemoryStore};

    async fn seed(store: &MemoryStore, username: &str, role: Role, dept: Department) -> User {
        store
            .create(NewUser {
                username: username.into(),
                password_hash: "x".into(),
                full_name: username.into(),
                email: format!("{username}@company.com"),
                role,
                department: Some(dept),
            })
            .await
            .unwrap()
            .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn request(date: &str, status: &str, remarks: &str, durations: &[Option<f64>]) -> UpsertAttendance {
        UpsertAttendance {
            date: Some(date.into()),
            status: Some(status.into()),
            remarks: Some(remarks.into()),
            sessions: durations
                .iter()
                .map(|d| Session {
                    duration: *d,
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn total_hours_is_sum_of_durations() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;

        let saved = upsert(
            &store,
            &store,
            Department::Hr,
            emp.id,
            request("2026-03-02", "present", "on site", &[Some(2.0), Some(3.5), None]),
        )
        .await
        .unwrap();

        assert_eq!(saved.total_hours, 5.5);
        assert_eq!(saved.sessions.len(), 3);
        assert!(saved.id.is_some());
    }

    #[actix_web::test]
    async fn second_upsert_updates_same_record() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;

        let first = upsert(&store, &store, Department::Hr, emp.id, request("2026-03-02", "present", "in", &[Some(8.0)]))
            .await
            .unwrap();
        let second = upsert(
            &store,
            &store,
            Department::Hr,
            emp.id,
            request("2026-03-02T18:00:00", "leave", "went home sick", &[]),
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.attendance_count(), 1);
        assert_eq!(second.status, AttendanceStatus::Leave);
        assert_eq!(second.total_hours, 0.0);
        assert!(second.sessions.is_empty());
    }

    #[actix_web::test]
    async fn blank_remarks_leave_existing_record_untouched() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;
        upsert(&store, &store, Department::Hr, emp.id, request("2026-03-02", "present", "ok", &[Some(8.0)]))
            .await
            .unwrap();

        for remarks in ["", "   \t"] {
            let err = upsert(&store, &store, Department::Hr, emp.id, request("2026-03-02", "absent", remarks, &[]))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let kept = store.find_one(emp.id, day()).await.unwrap().unwrap();
        assert_eq!(kept.status, AttendanceStatus::Present);
        assert_eq!(kept.remarks, "ok");
    }

    #[actix_web::test]
    async fn checks_run_in_order() {
        let store = MemoryStore::new();
        let other = seed(&store, "other", Role::Employee, Department::Iot).await;

        // missing status beats blank remarks
        let mut req = request("2026-03-02", "present", "", &[]);
        req.status = None;
        let err = upsert(&store, &store, Department::Hr, other.id, req).await.unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(_)));

        // blank remarks beat the department check
        let err = upsert(&store, &store, Department::Hr, other.id, request("2026-03-02", "present", " ", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = upsert(&store, &store, Department::Hr, other.id, request("2026-03-02", "present", "x", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
        assert_eq!(store.attendance_count(), 0);
    }

    #[actix_web::test]
    async fn unknown_user_is_denied_like_foreign_user() {
        let store = MemoryStore::new();
        let err = upsert(&store, &store, Department::Hr, 404, request("2026-03-02", "present", "x", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
    }

    #[actix_web::test]
    async fn roster_synthesizes_absent_without_persisting() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;
        let intern = seed(&store, "intern", Role::Intern, Department::Hr).await;
        seed(&store, "boss", Role::Manager, Department::Hr).await;
        seed(&store, "iot", Role::Employee, Department::Iot).await;

        upsert(&store, &store, Department::Hr, emp.id, request("2026-03-02", "late", "bus", &[Some(6.0)]))
            .await
            .unwrap();

        let view = department_daily(&store, &store, Department::Hr, day()).await.unwrap();
        let ids: Vec<_> = view.records.iter().map(|r| r.user.id).collect();
        assert_eq!(ids, [emp.id, intern.id]);

        assert_eq!(view.records[0].attendance.status, AttendanceStatus::Late);
        let absent = &view.records[1].attendance;
        assert_eq!(absent, &AttendanceRecord::absent(intern.id, day()));
        assert_eq!(absent.id, None);

        assert_eq!(store.attendance_count(), 1);
        assert!(store.find_one(intern.id, day()).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn detail_is_not_found_where_roster_is_absent() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;

        let view = department_daily(&store, &store, Department::Hr, day()).await.unwrap();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].attendance.status, AttendanceStatus::Absent);

        let err = detail(&store, &store, Department::Hr, emp.id, day()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl AttendanceStore for BrokenStore {
        async fn find_for_users(&self, _: &[u64], _: NaiveDate) -> anyhow::Result<Vec<AttendanceRecord>> {
            Err(anyhow::anyhow!("Lost connection to MySQL server"))
        }

        async fn find_one(&self, _: u64, _: NaiveDate) -> anyhow::Result<Option<AttendanceRecord>> {
            Err(anyhow::anyhow!("Lost connection to MySQL server"))
        }

        async fn save(&self, _: AttendanceRecord) -> anyhow::Result<AttendanceRecord> {
            Err(anyhow::anyhow!("Lost connection to MySQL server"))
        }
    }

    #[actix_web::test]
    async fn storage_faults_fail_the_whole_request() {
        let store = MemoryStore::new();
        let emp = seed(&store, "emp", Role::Employee, Department::Hr).await;

        let err = department_daily(&store, &BrokenStore, Department::Hr, day()).await.unwrap_err();
        assert!(matches!(&err, AppError::Storage(msg) if msg == "Lost connection to MySQL server"));

        let err = upsert(&store, &BrokenStore, Department::Hr, emp.id, request("2026-03-02", "present", "x", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn parse_date_rejects_missing_and_garbage() {
        assert!(matches!(parse_date(None), Err(AppError::MissingParameter(_))));
        assert!(matches!(parse_date(Some(" ")), Err(AppError::MissingParameter(_))));
        assert!(matches!(parse_date(Some("soon")), Err(AppError::MissingParameter(_))));
        assert_eq!(parse_date(Some("2026-03-02T09:15:00")).ok(), Some(day()));
    }
}
