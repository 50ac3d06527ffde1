use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{department::Department, role::Role};

/// Public projection of a directory user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "username": "jdoe",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "role": "employee",
        "department": "hr",
        "is_active": true
    })
)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<Department>,
    pub is_active: bool,
}

impl User {
    pub fn belongs_to(&self, department: Department) -> bool {
        self.department == Some(department)
    }
}

/// Directory row used by login: the user plus its stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// A user to be inserted by registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub department: Option<Department>,
}
