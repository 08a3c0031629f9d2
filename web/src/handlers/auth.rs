//! Signup, login, logout, and the session probe.

use crate::error::AppError;
use crate::extractors::{Authenticated, clear_session_cookie, session_cookie};
use crate::handlers::normalize_handle;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use campus_market_core::password;
use campus_market_core::session::Session;
use campus_market_core::user::User;
use campus_market_core::validate;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

/// Body of `POST /signup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name for the new account.
    pub full_name: String,
    /// Email address; must end with the configured domain suffix.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Optional CashApp handle (must start with `$`).
    #[serde(default)]
    pub cash_app: Option<String>,
    /// Optional Venmo handle (must start with `@`).
    #[serde(default)]
    pub venmo: Option<String>,
}

/// `POST /signup` — register a new account.
pub async fn signup<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, &'static str), AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    if request.full_name.trim().is_empty() {
        return Err(AppError::bad_request("Full name is required."));
    }
    if request.password.is_empty() {
        return Err(AppError::bad_request("Password is required."));
    }
    validate::validate_signup_email(&request.email, &state.config.email_domain_suffix)?;
    let cash_app = normalize_handle(request.cash_app);
    let venmo = normalize_handle(request.venmo);
    validate::validate_cash_app(cash_app.as_deref())?;
    validate::validate_venmo(venmo.as_deref())?;

    let password_hash = password::hash_password(&request.password)?;
    let user = User::new(
        request.full_name.trim().to_string(),
        request.email,
        password_hash,
        cash_app,
        venmo,
        Utc::now(),
    );
    state.users.insert(&user).await?;
    tracing::info!(user_id = %user.id, "user signed up");
    Ok((StatusCode::CREATED, "User signed up successfully!"))
}

/// Body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Plaintext password to verify.
    pub password: String,
}

/// `POST /login` — verify credentials and establish a session.
///
/// An unknown email and a wrong password are indistinguishable to the
/// caller.
pub async fn login<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .filter(|u| password::verify_password(&request.password, &u.password_hash));
    let Some(user) = user else {
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    let session = Session::new(user.id, user.email.clone(), Utc::now(), state.config.session_ttl);
    state.sessions.create(&session).await?;
    tracing::info!(user_id = %user.id, "user logged in");

    let headers = [(
        header::SET_COOKIE,
        session_cookie(session.session_id, state.config.session_ttl),
    )];
    Ok((StatusCode::OK, headers, "Login successful!").into_response())
}

/// `GET /logout` — drop the server-side session and expire the cookie.
///
/// Always succeeds, even without a live session.
pub async fn logout<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Option<Authenticated>,
) -> Result<Response, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    if let Some(auth) = auth {
        state.sessions.delete(auth.session.session_id).await?;
    }
    let headers = [(header::SET_COOKIE, clear_session_cookie())];
    Ok((StatusCode::OK, headers, "Logged out successfully").into_response())
}

/// `GET /api/user` — report whether the caller has a live session.
///
/// Never rejects; the anonymous answer is `{"loggedIn": false}`.
pub async fn session_probe(auth: Option<Authenticated>) -> Json<serde_json::Value> {
    match auth {
        Some(auth) => Json(json!({
            "loggedIn": true,
            "user": { "email": auth.session.email },
        })),
        None => Json(json!({ "loggedIn": false })),
    }
}
