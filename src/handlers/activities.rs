use crate::{
    dto::activity::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest},
    errors::ServiceError,
    handlers::common::{created_at_response, no_content_response, read_json, success_response},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Creates the router for activity endpoints
pub fn activities_routes() -> Router<AppState> {
    Router::new()
        .route("/create-activity", post(create_activity))
        .route("/get-all-activities", get(list_activities))
        .route(
            "/:id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

#[utoipa::path(
    post,
    path = "/Activity/create-activity",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity recorded", body = ActivityResponse),
        (status = 400, description = "Missing or invalid field", body = crate::errors::ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn create_activity(
    State(state): State<AppState>,
    payload: Result<Json<CreateActivityRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    let activity = state.services.activities.create(input).await?;
    let location = format!("/Activity/{}", activity.id);
    Ok(created_at_response(&location, activity))
}

#[utoipa::path(
    get,
    path = "/Activity/{id}",
    params(("id" = Uuid, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity retrieved", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let activity = state.services.activities.get_by_id(id).await?;
    Ok(success_response(activity))
}

#[utoipa::path(
    get,
    path = "/Activity/get-all-activities",
    responses(
        (status = 200, description = "All activities", body = [ActivityResponse])
    ),
    tag = "Activity"
)]
pub async fn list_activities(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let activities = state.services.activities.get_all().await?;
    Ok(success_response(activities))
}

#[utoipa::path(
    put,
    path = "/Activity/{id}",
    params(("id" = Uuid, Path, description = "Activity ID")),
    request_body = UpdateActivityRequest,
    responses(
        (status = 204, description = "Activity patched"),
        (status = 400, description = "Malformed body or blank field", body = crate::errors::ErrorResponse),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateActivityRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let input = read_json(payload)?;
    state.services.activities.update(id, input).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    delete,
    path = "/Activity/{id}",
    params(("id" = Uuid, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 404, description = "Activity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    state.services.activities.delete(id).await?;
    Ok(no_content_response())
}
