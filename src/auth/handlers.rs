use crate::{
    auth::{
        auth::AuthUser,
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    model::user::NewUser,
    models::{LoginReqDto, RegisterReq, TokenPair, TokenType},
    store::{RefreshTokenStore, UserDirectory},
    utils::{username_cache, username_filter},
};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

/// true  => username AVAILABLE
/// false => username TAKEN
pub async fn is_username_available(username: &str, users: &dyn UserDirectory) -> bool {
    let username = username.to_lowercase();

    // 1️⃣ Cuckoo filter — fast negative
    if !username_filter::might_exist(&username) {
        return true;
    }

    // 2️⃣ Moka cache — fast positive
    if username_cache::is_taken(&username).await {
        return false;
    }

    // 3️⃣ Storage fallback
    match users.username_exists(&username).await {
        Ok(exists) => !exists,
        Err(e) => {
            error!(error = %e, "Username lookup failed");
            false // fail-safe
        }
    }
}

/// Issues a fresh access/refresh pair and records the refresh `jti`.
async fn issue_tokens(
    user: &AuthUser,
    tokens: &dyn RefreshTokenStore,
    config: &Config,
) -> Result<TokenPair, HttpResponse> {
    let access_token = generate_access_token(user, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            HttpResponse::InternalServerError().finish()
        })?;

    let (refresh_token, refresh_claims) =
        generate_refresh_token(user, &config.jwt_secret, config.refresh_token_ttl).map_err(|e| {
            error!(error = %e, "Failed to sign refresh token");
            HttpResponse::InternalServerError().finish()
        })?;

    debug!(user_id = user.user_id, jti = %refresh_claims.jti, "Storing refresh token");

    tokens
        .insert(user.user_id, &refresh_claims.jti, refresh_claims.exp as i64)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store refresh token");
            HttpResponse::InternalServerError().finish()
        })?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// User registration handler
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "User registered", body = Object, example = json!({
            "message": "User registered successfully"
        })),
        (status = 400, description = "Missing fields or department"),
        (status = 403, description = "Role needs an administrator's bearer token"),
        (status = 409, description = "Username already taken")
    ),
    security((), ("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn register(
    payload: web::Json<RegisterReq>,
    caller: Option<AuthUser>,
    users: web::Data<dyn UserDirectory>,
) -> impl Responder {
    let payload = payload.into_inner();
    let username = payload.username.trim().to_lowercase();

    if username.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        }));
    }

    // Employees and interns sign themselves up; anything else is provisioned
    let permitted = match &caller {
        Some(caller) => caller.role.may_provision(payload.role),
        None => payload.role.is_self_service(),
    };
    if !permitted {
        warn!(
            role = %payload.role,
            caller = ?caller.as_ref().map(|c| c.user_id),
            "Registration refused for privileged role"
        );
        return HttpResponse::Forbidden().json(json!({
            "error": format!("Role '{}' can only be assigned by an administrator", payload.role)
        }));
    }

    if !payload.role.is_department_less() && payload.department.is_none() {
        return HttpResponse::BadRequest().json(json!({
            "error": format!("A department is required for role '{}'", payload.role)
        }));
    }

    if !is_username_available(&username, users.get_ref()).await {
        return HttpResponse::Conflict().json(json!({
            "error": "Username already taken"
        }));
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }));
        }
    };

    let new_user = NewUser {
        username: username.clone(),
        password_hash,
        full_name: payload.full_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        role: payload.role,
        // department-less roles never carry one
        department: payload.department.filter(|_| !payload.role.is_department_less()),
    };

    match users.create(new_user).await {
        Ok(Some(user)) => {
            username_filter::insert(&username);
            username_cache::mark_taken(&username).await;
            info!(user_id = user.id, role = %user.role, "User registered");

            HttpResponse::Created().json(json!({
                "message": "User registered successfully",
                "user": user
            }))
        }
        Ok(None) => HttpResponse::Conflict().json(json!({
            "error": "Username already exists"
        })),
        Err(e) => {
            error!(error = %e, "Failed to register user");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register user"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token pair", body = TokenPair),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(users, tokens, config, payload),
    fields(username = %payload.username)
)]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    users: web::Data<dyn UserDirectory>,
    tokens: web::Data<dyn RefreshTokenStore>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    // 1️⃣ Basic validation
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    // 2️⃣ Fetch user
    let credentials = match users.find_credentials(payload.username.trim()).await {
        Ok(Some(c)) if c.user.is_active => {
            debug!(user_id = c.user.id, "User found");
            c
        }
        Ok(_) => {
            info!("Invalid credentials: user not found or inactive");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Storage error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // 3️⃣ Verify password
    if let Err(e) = verify_password(&payload.password, &credentials.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    // 4️⃣ Tokens
    let subject = AuthUser::from(&credentials.user);
    let pair = match issue_tokens(&subject, tokens.get_ref(), &config).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    // 5️⃣ Update last_login_at (non-fatal)
    if let Err(e) = users.touch_last_login(subject.user_id).await {
        error!(error = %e, "Failed to update last_login_at");
    }

    info!("Login successful");
    HttpResponse::Ok().json(pair)
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Rotated token pair", body = TokenPair),
        (status = 401, description = "Missing, invalid or revoked refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    tokens: web::Data<dyn RefreshTokenStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let Some(token) = bearer_token(&req) else {
        return HttpResponse::Unauthorized().body("No token");
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) if c.token_type == TokenType::Refresh => c,
        _ => return HttpResponse::Unauthorized().finish(),
    };

    // 🔥 revoke old refresh token; fails if it was already used or revoked
    match tokens.revoke(&claims.jti).await {
        Ok(true) => {}
        Ok(false) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!(error = %e, "Failed to revoke refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    }

    // 🔄 issue new pair
    let subject = AuthUser::from(claims);
    match issue_tokens(&subject, tokens.get_ref(), &config).await {
        Ok(pair) => HttpResponse::Ok().json(pair),
        Err(resp) => resp,
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Refresh token revoked (idempotent)")),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    tokens: web::Data<dyn RefreshTokenStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let claims = match bearer_token(&req).map(|t| verify_token(t, &config.jwt_secret)) {
        Some(Ok(c)) if c.token_type == TokenType::Refresh => c,
        _ => return HttpResponse::NoContent().finish(),
    };

    // success even if the token didn't exist
    if let Err(e) = tokens.revoke(&claims.jti).await {
        error!(error = %e, "Failed to revoke refresh token on logout");
    }

    HttpResponse::NoContent().finish()
}
