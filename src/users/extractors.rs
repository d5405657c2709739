use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// Session token of a request whose cookie belongs to at least one user.
pub struct Session(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let name = &state.config.session.cookie_name;
        let token = read_cookie(&parts.headers, name).ok_or_else(|| {
            warn!(uri = %parts.uri, "missing session cookie");
            AppError::Unauthorized("missing session cookie".into())
        })?;

        if !state.users.session_exists(&token).await? {
            warn!(uri = %parts.uri, "unknown session");
            return Err(AppError::Unauthorized("unknown session".into()));
        }

        Ok(Session(token))
    }
}

/// Value of the first non-empty cookie called `name`.
pub(crate) fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == name && !v.is_empty())
        .map(|(_, v)| v.to_string())
}

pub(crate) fn session_cookie(name: &str, token: &str, max_age_secs: i64) -> String {
    format!("{name}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax")
}
