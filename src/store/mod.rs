//! Storage seams used by the handlers.
//!
//! Handlers receive these as `web::Data<dyn Trait>`, so the same routes run
//! against MySQL in production and the in-memory store in tests.

pub mod memory;
pub mod mysql;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{
    attendance::AttendanceRecord,
    department::Department,
    role::Role,
    user::{NewUser, User, UserCredentials},
};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>>;

    /// Users of `department` holding one of `roles`, ordered by id.
    async fn list_by_department(&self, department: Department, roles: &[Role]) -> Result<Vec<User>>;

    /// Inserts a user; `Ok(None)` when the username is already taken.
    async fn create(&self, user: NewUser) -> Result<Option<User>>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    async fn all_usernames(&self) -> Result<Vec<String>>;

    /// Usernames that logged in within the last `days` days, most recent first.
    async fn recent_usernames(&self, days: u32) -> Result<Vec<String>>;

    async fn touch_last_login(&self, user_id: u64) -> Result<()>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Every record for `user_ids` on `date`, fetched in one round trip.
    async fn find_for_users(&self, user_ids: &[u64], date: NaiveDate) -> Result<Vec<AttendanceRecord>>;

    async fn find_one(&self, user_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>>;

    /// Inserts or replaces the record keyed by `(user_id, date)` and returns it as stored.
    async fn save(&self, record: AttendanceRecord) -> Result<AttendanceRecord>;
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, user_id: u64, jti: &str, expires_at: i64) -> Result<()>;

    /// Revokes `jti` and reports whether it was live beforehand.
    async fn revoke(&self, jti: &str) -> Result<bool>;
}
