use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::envelope::ApiResponse;
use crate::models::{Claims, TokenType};
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};

/// Why a request on the protected scope was turned away.
#[derive(Debug)]
enum Rejection {
    MissingHeader,
    MalformedHeader,
    BadToken(String),
    NotAnAccessToken,
}

impl Rejection {
    fn into_response(self) -> HttpResponse {
        let body = match self {
            Rejection::MissingHeader => {
                ApiResponse::<()>::failure("Missing Authorization header", None)
            }
            Rejection::MalformedHeader => {
                ApiResponse::<()>::failure("Authorization header must be 'Bearer <token>'", None)
            }
            Rejection::BadToken(cause) => {
                ApiResponse::<()>::failure("Invalid or expired token", Some(&cause))
            }
            Rejection::NotAnAccessToken => ApiResponse::<()>::failure("Access token required", None),
        };
        HttpResponse::Unauthorized().json(body)
    }
}

fn access_claims(req: &ServiceRequest, secret: &str) -> Result<Claims, Rejection> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(Rejection::MissingHeader)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(Rejection::MalformedHeader)?;

    let claims = verify_token(token, secret).map_err(Rejection::BadToken)?;

    // Refresh tokens only work against /auth/refresh and /auth/logout
    if claims.token_type != TokenType::Access {
        return Err(Rejection::NotAnAccessToken);
    }
    Ok(claims)
}

/// Verifies the bearer access token and stashes the caller as [`AuthUser`].
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    match access_claims(&req, &config.jwt_secret) {
        Ok(claims) => {
            tracing::debug!(user_id = claims.user_id, role = %claims.role, "Authenticated request");
            req.extensions_mut().insert(AuthUser::from(claims));
            next.call(req).await
        }
        Err(rejection) => {
            tracing::debug!(?rejection, path = req.path(), "Rejected request");
            let resp = rejection.into_response();
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}
