//! Request extractors and session-cookie helpers.

use crate::error::AppError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use campus_market_core::ids::SessionId;
use campus_market_core::session::Session;
use campus_market_store::{ListingStore, ReviewStore, SessionStore, UserStore};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "campus_session";

/// Extractor for an authenticated request.
///
/// Reads the session cookie, resolves it against the session store,
/// and rejects with 401 when the cookie is missing, unknown, or
/// expired. Use `Option<Authenticated>` for endpoints that only probe
/// for a session.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The live session backing this request.
    pub session: Session,
}

/// Pull the session ID out of the `Cookie` header, if present.
fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != SESSION_COOKIE {
            return None;
        }
        uuid::Uuid::parse_str(value.trim()).ok().map(SessionId)
    })
}

#[async_trait]
impl<U, L, R, S> FromRequestParts<AppState<U, L, R, S>> for Authenticated
where
    U: UserStore + Clone + 'static,
    L: ListingStore + Clone + 'static,
    R: ReviewStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, L, R, S>,
    ) -> Result<Self, Self::Rejection> {
        let Some(session_id) = session_id_from_headers(&parts.headers) else {
            return Err(AppError::unauthorized("Unauthorized"));
        };
        let session = state
            .sessions
            .get(session_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
        Ok(Self { session })
    }
}

/// Build the `Set-Cookie` value establishing a session.
#[must_use]
pub fn session_cookie(session_id: SessionId, ttl: chrono::Duration) -> String {
    format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.num_seconds()
    )
}

/// Build the `Set-Cookie` value clearing the session cookie.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn session_id_is_parsed_from_the_cookie_header() {
        let id = SessionId::new();
        let headers = headers_with_cookie(&format!("other=1; {SESSION_COOKIE}={id}; theme=dark"));
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn missing_or_malformed_cookies_yield_no_session() {
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
        assert_eq!(
            session_id_from_headers(&headers_with_cookie("theme=dark")),
            None
        );
        assert_eq!(
            session_id_from_headers(&headers_with_cookie(&format!(
                "{SESSION_COOKIE}=not-a-uuid"
            ))),
            None
        );
    }

    #[test]
    fn cookie_values_round_trip() {
        let id = SessionId::new();
        let cookie = session_cookie(id, chrono::Duration::hours(24));
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={id}")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
