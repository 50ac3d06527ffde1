use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};

use super::{AttendanceStore, RefreshTokenStore, UserDirectory};
use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, Session},
    department::Department,
    role::Role,
    user::{NewUser, User, UserCredentials},
};

/// MySQL-backed implementation of every storage seam.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, username, password, full_name, email, role, department, is_active";

#[derive(FromRow)]
struct UserRow {
    id: u64, // BIGINT UNSIGNED
    username: String,
    password: String,
    full_name: String,
    email: String,
    role: String,
    department: Option<String>,
    is_active: bool,
}

impl TryFrom<UserRow> for UserCredentials {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = Role::from_name(&row.role)
            .ok_or_else(|| anyhow!("user {} has unknown role '{}'", row.id, row.role))?;
        let department = row.department.as_deref().and_then(Department::from_name);

        Ok(UserCredentials {
            user: User {
                id: row.id,
                username: row.username,
                full_name: row.full_name,
                email: row.email,
                role,
                department,
                is_active: row.is_active,
            },
            password_hash: row.password,
        })
    }
}

const ATTENDANCE_COLUMNS: &str = "id, user_id, date, status, sessions, total_hours, remarks";

#[derive(FromRow)]
struct AttendanceRow {
    id: u64,
    user_id: u64,
    date: NaiveDate,
    status: String,
    sessions: String,
    total_hours: f64,
    remarks: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = anyhow::Error;

    fn try_from(row: AttendanceRow) -> Result<Self> {
        let status: AttendanceStatus = row
            .status
            .parse()
            .map_err(|_| anyhow!("attendance {} has unknown status '{}'", row.id, row.status))?;
        let sessions: Vec<Session> = serde_json::from_str(&row.sessions)
            .with_context(|| format!("attendance {} has malformed sessions", row.id))?;

        Ok(AttendanceRecord {
            id: Some(row.id),
            user_id: row.user_id,
            date: row.date,
            status,
            sessions,
            total_hours: row.total_hours,
            remarks: row.remarks,
        })
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[async_trait]
impl UserDirectory for MySqlStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| UserCredentials::try_from(r).map(|c| c.user))
            .transpose()
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserCredentials::try_from).transpose()
    }

    async fn list_by_department(&self, department: Department, roles: &[Role]) -> Result<Vec<User>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE department = ? AND role IN ({}) ORDER BY id",
            placeholders(roles.len())
        );
        let mut query = sqlx::query_as::<_, UserRow>(&sql).bind(department.to_string());
        for role in roles {
            query = query.bind(role.to_string());
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|r| UserCredentials::try_from(r).map(|c| c.user))
            .collect()
    }

    async fn create(&self, new: NewUser) -> Result<Option<User>> {
        let username = new.username.to_lowercase();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, full_name, email, role, department)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&username)
        .bind(&new.password_hash)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(new.role.to_string())
        .bind(new.department.map(|d| d.to_string()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(Some(User {
                id: done.last_insert_id(),
                username,
                full_name: new.full_name,
                email: new.email,
                role: new.role,
                department: new.department,
                is_active: true,
            })),
            // Duplicate username
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23000") => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? LIMIT 1)",
        )
        .bind(username.to_lowercase())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }

    async fn all_usernames(&self) -> Result<Vec<String>> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT username FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(u,)| u).collect())
    }

    async fn recent_usernames(&self, days: u32) -> Result<Vec<String>> {
        let rows = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT username
            FROM users
            WHERE last_login_at >= NOW() - INTERVAL ? DAY
            ORDER BY last_login_at DESC
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(u,)| u).collect())
    }

    async fn touch_last_login(&self, user_id: u64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn find_for_users(&self, user_ids: &[u64], date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE date = ? AND user_id IN ({})",
            placeholders(user_ids.len())
        );
        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql).bind(date);
        for id in user_ids {
            query = query.bind(*id);
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect()
    }

    async fn find_one(&self, user_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE user_id = ? AND date = ?");
        sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        let sessions = serde_json::to_string(&record.sessions)?;

        // (user_id, date) is UNIQUE, so concurrent writers for one day collapse
        // into a single row and the last one wins.
        sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, status, sessions, total_hours, remarks)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                status = VALUES(status),
                sessions = VALUES(sessions),
                total_hours = VALUES(total_hours),
                remarks = VALUES(remarks)
            "#,
        )
        .bind(record.user_id)
        .bind(record.date)
        .bind(record.status.to_string())
        .bind(&sessions)
        .bind(record.total_hours)
        .bind(&record.remarks)
        .execute(&self.pool)
        .await?;

        self.find_one(record.user_id, record.date)
            .await?
            .ok_or_else(|| anyhow!("attendance row vanished after save"))
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlStore {
    async fn insert(&self, user_id: u64, jti: &str, expires_at: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, jti, expires_at)
            VALUES (?, ?, FROM_UNIXTIME(?))
            "#,
        )
        .bind(user_id)
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn revoke(&self, jti: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ? AND revoked = FALSE",
        )
        .bind(jti)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
