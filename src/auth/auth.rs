use actix_web::{
    FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data,
};
use futures::future::{Ready, ready};

use crate::{
    auth::jwt::verify_token,
    config::Config,
    error::AppError,
    model::{department::Department, role::Role, user::User},
    models::{Claims, TokenType},
};

/// The authenticated caller, taken from a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,

    /// Absent for department-less roles
    pub department: Option<Department>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            role: claims.role,
            department: claims.department,
        }
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        AuthUser {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            department: user.department,
        }
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Already verified by the auth middleware
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) if claims.token_type == TokenType::Access => {
                ready(Ok(AuthUser::from(claims)))
            }
            _ => ready(Err(ErrorUnauthorized("Invalid token"))),
        }
    }
}

impl AuthUser {
    /// Department of a manager; anyone else is turned away.
    pub fn require_manager(&self) -> Result<Department, AppError> {
        match (self.role, self.department) {
            (Role::Manager, Some(department)) => Ok(department),
            (Role::Manager, None) => Err(AppError::denied("Manager has no department")),
            _ => Err(AppError::denied("Managers only")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, department: Option<Department>) -> AuthUser {
        AuthUser {
            user_id: 1,
            username: "u".into(),
            role,
            department,
        }
    }

    #[test]
    fn only_departmental_managers_pass() {
        assert_eq!(
            user(Role::Manager, Some(Department::Iot)).require_manager().ok(),
            Some(Department::Iot)
        );
        assert!(user(Role::Manager, None).require_manager().is_err());
        assert!(user(Role::Employee, Some(Department::Iot)).require_manager().is_err());
        assert!(user(Role::Superadmin, None).require_manager().is_err());
    }
}
