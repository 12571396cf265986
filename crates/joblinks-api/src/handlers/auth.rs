//! Login, registration and identity handlers.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use joblinks_db::{DbError, UserRecord};
use joblinks_models::{
    CurrentUser, LoginRequest, RegisterRequest, RegisteredUser, Role, TokenResponse,
};
use tracing::{error, info, warn};
use validator::{Validate, ValidateEmail};

use crate::auth::{AuthUser, Verification};
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, ApiJson};
use crate::metrics;
use crate::security::{sanitize_optional, sanitize_title};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// `POST /api/auth/login`: exchange email-or-name plus password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::bad_request("Username and password are required."));
    }

    let user = state
        .repos
        .users
        .find_by_login(&request.username)
        .await?
        .ok_or_else(|| {
            metrics::record_login("rejected");
            ApiError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let outcome = state
        .hasher
        .verify(request.password.clone(), user.password_hash.clone())
        .await?;

    match outcome {
        Verification::Failed => {
            info!(user_id = user.user_id, "Login rejected");
            metrics::record_login("rejected");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        Verification::SuccessRehashNeeded => {
            let rehashed = state.hasher.hash(request.password).await?;
            state
                .repos
                .users
                .update_password_hash(user.user_id, rehashed)
                .await
                .map_err(|e| {
                    error!(user_id = user.user_id, error = %e, "Failed to persist rehashed password");
                    e
                })?;
            info!(user_id = user.user_id, "Upgraded stored password hash");
            metrics::record_login("rehashed");
        }
        Verification::Success => metrics::record_login("success"),
    }

    let issued = state.tokens.issue(user.user_id, &user.name, user.role())?;
    info!(user_id = user.user_id, "User logged in");

    Ok(Json(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// `POST /api/auth/register`: public sign-up.
///
/// A requested role is honoured only when the caller holds an Admin token.
pub async fn register(
    State(state): State<AppState>,
    caller: Option<AuthUser>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<Response> {
    let email = request.email.trim().to_string();
    if email.is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::bad_request("Email and password are required."));
    }
    if !email.validate_email() {
        return Err(ApiError::Validation("email: invalid email address".to_string()));
    }
    request.validate()?;

    if state.repos.users.email_exists(&email).await? {
        return Err(ApiError::conflict("Email already in use."));
    }

    let caller_is_admin = caller.as_ref().is_some_and(|c| c.actor.is_admin());
    let role = match request.role {
        Some(code) if caller_is_admin => {
            Role::try_from(code).map_err(|e| ApiError::Validation(format!("role: {e}")))?
        }
        Some(code) if code != Role::default().code() => {
            warn!(requested = code, "Ignoring role requested by non-admin registration");
            Role::default()
        }
        _ => Role::default(),
    };

    let name = match sanitize_title(&request.name) {
        name if name.is_empty() => email.clone(),
        name => name,
    };
    let password_hash = state.hasher.hash(request.password).await?;

    let user = state
        .repos
        .users
        .create(UserRecord {
            name,
            email,
            password_hash,
            phone_number: request.phone_number,
            nationality: request.nationality,
            job_preference: request.job_preference,
            profile_bio: sanitize_optional(request.profile_bio),
            do_b: request.do_b,
            role,
        })
        .await
        .map_err(|e| match e {
            DbError::Duplicate(_) => ApiError::conflict("Email already in use."),
            other => other.into(),
        })?;

    info!(user_id = user.user_id, role = %user.role, "Registered user");
    Ok(created(
        format!("/api/users/{}", user.user_id),
        RegisteredUser {
            id: user.user_id,
            email: user.email,
            role: user.role,
        },
    ))
}

/// `GET /api/auth/me`: identity carried by the caller's token.
pub async fn me(user: AuthUser) -> Json<CurrentUser> {
    Json(CurrentUser {
        user_id: user.actor.user_id,
        name: user.name,
        role: user.actor.role,
    })
}
