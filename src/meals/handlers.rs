use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument, warn};

use super::{
    dto::{CreateMealRequest, CreatedMealResponse, MealBody, MealResponse, MealsResponse},
    metrics::{compute_metrics, MetricsSummary},
};
use crate::{
    error::AppError,
    state::AppState,
    users::extractors::Session,
    validate::{json_body, parse_id},
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/metrics/:user_id", get(get_metrics))
        .route("/meals/:user_id", get(list_meals))
        .route(
            "/meals/:user_id/:meal_id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state, _session))]
pub async fn list_meals(
    State(state): State<AppState>,
    _session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<MealsResponse>, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let meals = state.meals.list_by_user(user_id).await?;
    Ok(Json(MealsResponse { meals }))
}

#[instrument(skip(state, _session, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    _session: Session,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedMealResponse>), AppError> {
    let (user_id, body) = json_body(payload)?.into_parts();
    let user_id = parse_id("userId", &user_id)?;
    let fields = body.into_fields()?;

    if state.users.find(user_id).await?.is_none() {
        warn!(%user_id, "meal for unknown user");
        return Err(AppError::NotFound("User not found".into()));
    }

    let meal_id = state.meals.insert(user_id, fields).await?;
    info!(%user_id, %meal_id, "meal created");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&format!("/meals/{}/{}", user_id, meal_id))
            .map_err(|e| AppError::Internal(e.into()))?,
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedMealResponse { id: meal_id }),
    ))
}

#[instrument(skip(state, _session))]
pub async fn get_meal(
    State(state): State<AppState>,
    _session: Session,
    Path((user_id, meal_id)): Path<(String, String)>,
) -> Result<Json<MealResponse>, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let meal_id = parse_id("mealId", &meal_id)?;

    match state.meals.get_one(user_id, meal_id).await? {
        Some(meal) => Ok(Json(MealResponse { meal })),
        None => {
            warn!(%user_id, %meal_id, "meal not found");
            Err(meal_not_found())
        }
    }
}

#[instrument(skip(state, _session, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    _session: Session,
    Path((user_id, meal_id)): Path<(String, String)>,
    payload: Result<Json<MealBody>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let meal_id = parse_id("mealId", &meal_id)?;
    let fields = json_body(payload)?.into_fields()?;

    if !state.meals.update_one(user_id, meal_id, fields).await? {
        warn!(%user_id, %meal_id, "update of unknown meal");
        return Err(meal_not_found());
    }
    info!(%user_id, %meal_id, "meal updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, _session))]
pub async fn delete_meal(
    State(state): State<AppState>,
    _session: Session,
    Path((user_id, meal_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let meal_id = parse_id("mealId", &meal_id)?;

    if !state.meals.delete_one(user_id, meal_id).await? {
        warn!(%user_id, %meal_id, "delete of unknown meal");
        return Err(meal_not_found());
    }
    info!(%user_id, %meal_id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Recomputed from the store on every call.
#[instrument(skip(state, _session))]
pub async fn get_metrics(
    State(state): State<AppState>,
    _session: Session,
    Path(user_id): Path<String>,
) -> Result<Json<MetricsSummary>, AppError> {
    let user_id = parse_id("userId", &user_id)?;
    let meals = state.meals.list_by_user(user_id).await?;
    let summary = compute_metrics(&meals);
    debug!(%user_id, ?summary, "metrics computed");
    Ok(Json(summary))
}

fn meal_not_found() -> AppError {
    AppError::NotFound("Meal not found for this user".into())
}
