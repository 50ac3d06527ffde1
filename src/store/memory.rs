use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};

use super::{AttendanceStore, RefreshTokenStore, UserDirectory};
use crate::model::{
    attendance::AttendanceRecord,
    department::Department,
    role::Role,
    user::{NewUser, User, UserCredentials},
};

struct StoredUser {
    credentials: UserCredentials,
    last_login_at: Option<NaiveDateTime>,
}

struct StoredToken {
    revoked: bool,
}

#[derive(Default)]
struct State {
    users: BTreeMap<u64, StoredUser>,
    attendance: HashMap<(u64, NaiveDate), AttendanceRecord>,
    tokens: HashMap<String, StoredToken>,
    next_user_id: u64,
    next_attendance_id: u64,
}

/// Process-local store for development and tests. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }

    /// Number of stored attendance rows.
    #[cfg(test)]
    pub fn attendance_count(&self) -> usize {
        self.state
            .lock()
            .map(|s| s.attendance.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(&id).map(|u| u.credentials.user.clone()))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        let username = username.to_lowercase();
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.credentials.user.username == username)
            .map(|u| u.credentials.clone()))
    }

    async fn list_by_department(&self, department: Department, roles: &[Role]) -> Result<Vec<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .map(|u| &u.credentials.user)
            .filter(|u| u.belongs_to(department) && roles.contains(&u.role))
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewUser) -> Result<Option<User>> {
        let mut state = self.lock()?;
        let username = new.username.to_lowercase();
        if state
            .users
            .values()
            .any(|u| u.credentials.user.username == username)
        {
            return Ok(None);
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username,
            full_name: new.full_name,
            email: new.email,
            role: new.role,
            department: new.department,
            is_active: true,
        };
        state.users.insert(
            user.id,
            StoredUser {
                credentials: UserCredentials {
                    user: user.clone(),
                    password_hash: new.password_hash,
                },
                last_login_at: None,
            },
        );
        Ok(Some(user))
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.find_credentials(username).await?.is_some())
    }

    async fn all_usernames(&self) -> Result<Vec<String>> {
        Ok(self
            .lock()?
            .users
            .values()
            .map(|u| u.credentials.user.username.clone())
            .collect())
    }

    async fn recent_usernames(&self, days: u32) -> Result<Vec<String>> {
        let cutoff = Utc::now().naive_utc() - Duration::days(i64::from(days));
        let state = self.lock()?;
        let mut recent: Vec<_> = state
            .users
            .values()
            .filter_map(|u| {
                u.last_login_at
                    .filter(|at| *at >= cutoff)
                    .map(|at| (at, u.credentials.user.username.clone()))
            })
            .collect();
        recent.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(recent.into_iter().map(|(_, name)| name).collect())
    }

    async fn touch_last_login(&self, user_id: u64) -> Result<()> {
        if let Some(user) = self.lock()?.users.get_mut(&user_id) {
            user.last_login_at = Some(Utc::now().naive_utc());
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn find_for_users(&self, user_ids: &[u64], date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let state = self.lock()?;
        Ok(user_ids
            .iter()
            .filter_map(|id| state.attendance.get(&(*id, date)).cloned())
            .collect())
    }

    async fn find_one(&self, user_id: u64, date: NaiveDate) -> Result<Option<AttendanceRecord>> {
        Ok(self.lock()?.attendance.get(&(user_id, date)).cloned())
    }

    async fn save(&self, mut record: AttendanceRecord) -> Result<AttendanceRecord> {
        let mut state = self.lock()?;
        let key = (record.user_id, record.date);

        record.id = match state.attendance.get(&key).and_then(|r| r.id) {
            Some(id) => Some(id),
            None => {
                state.next_attendance_id += 1;
                Some(state.next_attendance_id)
            }
        };
        state.attendance.insert(key, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn insert(&self, _user_id: u64, jti: &str, _expires_at: i64) -> Result<()> {
        self.lock()?
            .tokens
            .insert(jti.to_owned(), StoredToken { revoked: false });
        Ok(())
    }

    async fn revoke(&self, jti: &str) -> Result<bool> {
        match self.lock()?.tokens.get_mut(jti) {
            Some(token) if !token.revoked => {
                token.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;

    fn new_user(username: &str, role: Role, department: Option<Department>) -> NewUser {
        NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            full_name: username.into(),
            email: format!("{username}@company.com"),
            role,
            department,
        }
    }

    #[actix_web::test]
    async fn usernames_are_unique_case_insensitively() {
        let store = MemoryStore::new();
        assert!(store.create(new_user("Alice", Role::Employee, Some(Department::Hr))).await.unwrap().is_some());
        assert!(store.create(new_user("alice", Role::Intern, Some(Department::Iot))).await.unwrap().is_none());
        assert!(store.username_exists("ALICE").await.unwrap());
    }

    #[actix_web::test]
    async fn department_listing_filters_roles() {
        let store = MemoryStore::new();
        for (name, role, dept) in [
            ("e1", Role::Employee, Department::Hr),
            ("m1", Role::Manager, Department::Hr),
            ("i1", Role::Intern, Department::Hr),
            ("e2", Role::Employee, Department::Iot),
        ] {
            store.create(new_user(name, role, Some(dept))).await.unwrap();
        }

        let names: Vec<_> = store
            .list_by_department(Department::Hr, &Role::ROSTER)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, ["e1", "i1"]);
    }

    #[actix_web::test]
    async fn save_keeps_id_for_same_day() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let first = store.save(AttendanceRecord::new(1, date)).await.unwrap();
        let mut again = AttendanceRecord::new(1, date);
        again.status = AttendanceStatus::Present;
        let second = store.save(again).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.attendance_count(), 1);
        assert_eq!(
            store.find_one(1, date).await.unwrap().map(|r| r.status),
            Some(AttendanceStatus::Present)
        );
    }

    #[actix_web::test]
    async fn refresh_tokens_revoke_once() {
        let store = MemoryStore::new();
        store.insert(1, "jti-1", 0).await.unwrap();
        assert!(store.revoke("jti-1").await.unwrap());
        assert!(!store.revoke("jti-1").await.unwrap());
        assert!(!store.revoke("missing").await.unwrap());
    }
}
