//! Handlers for the `/auth` resource (signup, login, refresh, logout) (PRD-01).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tulong_core::error::CoreError;
use tulong_core::roles::ROLE_DONOR;
use tulong_db::models::account::{Account, AccountResponse, CreateAccount};
use tulong_db::models::session::CreateSession;
use tulong_db::repositories::{AccountRepo, RoleRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

/// Minimum password length enforced on signup.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub contact_number: String,
    pub password: String,
    pub org_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub contact_number: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by signup, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub account: AccountResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a donor account. Admin accounts are provisioned out of band, so
/// the public signup always lands in the `donor` role with no barangay scope.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. Validate the form.
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::MissingField { field: "name" }));
    }
    let contact_number = input.contact_number.trim();
    if contact_number.is_empty() {
        return Err(AppError::Core(CoreError::MissingField {
            field: "contact_number",
        }));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Hash the password.
    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 3. Resolve the donor role. A missing row means unapplied migrations.
    let role = RoleRepo::find_by_name(&state.pool, ROLE_DONOR)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Role '{ROLE_DONOR}' is not seeded"))
        })?;

    // 4. Create the account. A duplicate contact number surfaces as 409 via
    //    the `uq_accounts_contact_number` constraint.
    let create_dto = CreateAccount {
        name: name.to_string(),
        org_name: input.org_name.filter(|s| !s.trim().is_empty()),
        contact_number: contact_number.to_string(),
        email: input.email.filter(|s| !s.trim().is_empty()),
        address: input.address.filter(|s| !s.trim().is_empty()),
        password_hash: hashed,
        role_id: role.id,
        barangay_id: None,
    };
    let account = AccountRepo::create(&state.pool, &create_dto).await?;

    // 5. Issue tokens so the new donor is signed in immediately.
    let response = create_auth_response(&state, &account, &role.name).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with contact number + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find the account by contact number.
    let account = AccountRepo::find_by_contact_number(&state.pool, input.contact_number.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid contact number or password".into(),
            ))
        })?;

    // 2. Check if the account is active.
    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = account.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold exceeded.
        AccountRepo::increment_failed_login(&state.pool, account.id).await?;

        let new_count = account.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            AccountRepo::lock_account(&state.pool, account.id, lock_until).await?;
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid contact number or password".into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    AccountRepo::record_successful_login(&state.pool, account.id).await?;

    // 7. Resolve role name for JWT claims.
    let role_name = RoleRepo::resolve_name(&state.pool, account.role_id).await?;

    // 8. Generate tokens and create session.
    let response = create_auth_response(&state, &account, &role_name).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Find account and resolve role.
    let account = AccountRepo::find_by_id(&state.pool, session.account_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let role_name = RoleRepo::resolve_name(&state.pool, account.role_id).await?;

    // 5. Generate new tokens and create new session.
    let response = create_auth_response(&state, &account, &role_name).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated account. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_account(&state.pool, auth_user.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    account: &Account,
    role: &str,
) -> AppResult<AuthResponse> {
    let access_token =
        generate_access_token(account.id, role, account.barangay_id, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        account_id: account.id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent: None,
        ip_address: None,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        account: AccountResponse::from_account(account, role.to_string()),
    })
}
