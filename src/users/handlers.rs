use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, CreatedUserResponse, UserResponse, UsersResponse},
        extractors::{read_cookie, session_cookie, Session},
    },
    validate::{json_body, parse_id},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/:id", get(get_user).delete(delete_user))
}

/// Creates a user, issuing a session cookie unless the request already has one.
#[instrument(skip(state, headers, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedUserResponse>), AppError> {
    let body = json_body(payload)?;
    let cfg = &state.config.session;

    let (session_id, issued) = match read_cookie(&headers, &cfg.cookie_name) {
        Some(token) => (token, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    let user = state.users.create(&body.name, &session_id).await?;

    let mut out = HeaderMap::new();
    if issued {
        let cookie = session_cookie(&cfg.cookie_name, &session_id, cfg.max_age_secs());
        out.insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.into()))?,
        );
    }

    info!(user_id = %user.id, new_session = issued, "user created");
    Ok((StatusCode::CREATED, out, Json(CreatedUserResponse { id: user.id })))
}

#[instrument(skip(state, session))]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<UsersResponse>, AppError> {
    let users = state.users.list_by_session(&session.0).await?;
    Ok(Json(UsersResponse { users }))
}

#[instrument(skip(state, _session))]
pub async fn get_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_id("id", &id)?;
    match state.users.find(id).await? {
        Some(user) => Ok(Json(UserResponse { user })),
        None => {
            warn!(%id, "user not found");
            Err(AppError::NotFound("User not found".into()))
        }
    }
}

#[instrument(skip(state, _session))]
pub async fn delete_user(
    State(state): State<AppState>,
    _session: Session,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id("id", &id)?;
    if !state.users.delete(id).await? {
        warn!(%id, "delete of unknown user");
        return Err(AppError::NotFound("User not found".into()));
    }
    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
