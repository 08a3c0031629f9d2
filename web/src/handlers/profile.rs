//! Profile read and partial update.

use crate::error::AppError;
use crate::extractors::Authenticated;
use crate::handlers::normalize_handle;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use campus_market_core::password;
use campus_market_core::validate;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Response body of `GET /api/user/profile`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// CashApp handle, if set.
    pub cash_app: Option<String>,
    /// Venmo handle, if set.
    pub venmo: Option<String>,
}

/// `GET /api/user/profile` — the caller's own profile.
pub async fn get_profile<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
) -> Result<Json<ProfileResponse>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let user = state.users.get(auth.session.user_id).await?;
    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email,
        cash_app: user.cash_app,
        venmo: user.venmo,
    }))
}

/// Body of `POST /api/user/profile/update`. Every field is optional;
/// only provided fields change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// New email address; must carry the configured domain suffix.
    #[serde(default)]
    pub new_email: Option<String>,
    /// New password, re-hashed before storage.
    #[serde(default)]
    pub new_password: Option<String>,
    /// New CashApp handle.
    #[serde(default)]
    pub cash_app: Option<String>,
    /// New Venmo handle.
    #[serde(default)]
    pub venmo: Option<String>,
}

/// `POST /api/user/profile/update` — partial profile update.
///
/// When the email changes, the session's cached email is refreshed so
/// the probe endpoint reflects it immediately.
pub async fn update_profile<U, L, R, S>(
    State(state): State<AppState<U, L, R, S>>,
    auth: Authenticated,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError>
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    let mut user = state.users.get(auth.session.user_id).await?;

    let cash_app = normalize_handle(request.cash_app);
    let venmo = normalize_handle(request.venmo);
    validate::validate_cash_app(cash_app.as_deref())?;
    validate::validate_venmo(venmo.as_deref())?;

    let new_email = request.new_email.filter(|e| !e.trim().is_empty());
    if let Some(email) = &new_email {
        validate::validate_signup_email(email, &state.config.email_domain_suffix)?;
    }

    if let Some(name) = request.full_name.filter(|n| !n.trim().is_empty()) {
        user.name = name.trim().to_string();
    }
    let email_changed = match new_email {
        Some(email) if email != user.email => {
            user.email = email;
            true
        }
        _ => false,
    };
    if let Some(handle) = cash_app {
        user.cash_app = Some(handle);
    }
    if let Some(handle) = venmo {
        user.venmo = Some(handle);
    }
    if let Some(password) = request.new_password.filter(|p| !p.is_empty()) {
        user.password_hash = password::hash_password(&password)?;
    }

    state.users.update(&user).await?;

    if email_changed {
        let mut session = auth.session;
        session.email.clone_from(&user.email);
        state.sessions.update(&session).await?;
        tracing::info!(user_id = %user.id, "profile email changed");
    }

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}
