use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest, UsersResponse},
        jwt::JwtKeys,
        password,
        repo_types::{NewUser, User},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/signup", post(signup))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks the request shape before any store or hash work happens.
fn validate_signup(payload: &SignupRequest) -> Result<(), ApiError> {
    if payload.fname.trim().is_empty() || payload.lname.trim().is_empty() {
        warn!("signup with empty name");
        return Err(ApiError::InvalidInput);
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "signup with invalid email");
        return Err(ApiError::InvalidInput);
    }
    if payload.password.len() < 6 {
        warn!("signup password too short");
        return Err(ApiError::InvalidInput);
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = User::find_all(&state.db)
        .await
        .map_err(ApiError::StoreUnavailable)?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(PublicUser::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validate_signup(&payload)?;

    let existing = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::StoreUnavailable)?;
    if existing.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::DuplicateAccount);
    }

    let hash =
        password::hash_password(&payload.password).map_err(ApiError::CredentialOperationFailed)?;

    let new_user = NewUser {
        fname: &payload.fname,
        lname: &payload.lname,
        email: &payload.email,
        password_hash: &hash,
        image: payload.image.as_deref(),
    };
    let user = User::create(&state.db, &new_user).await.map_err(|e| {
        // A concurrent signup can slip past the lookup; the unique
        // constraint is the final arbiter.
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            ApiError::DuplicateAccount
        } else {
            ApiError::PersistenceFailed(e)
        }
    })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.email)
        .map_err(ApiError::TokenIssuanceFailed)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id,
            email: user.email,
            fname: user.fname,
            lname: user.lname,
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::StoreUnavailable)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    let ok = password::verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::CredentialOperationFailed)?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.email)
        .map_err(ApiError::TokenIssuanceFailed)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        user_id: user.id,
        email: user.email,
        fname: user.fname,
        lname: user.lname,
        token,
    }))
}
