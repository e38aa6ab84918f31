use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::profile::{CreateProfileRequest, FaceMapEntry, ProfileResponse, UpdateProfileRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(db.pool(), id).await?;

    Ok(Json(ProfileResponse::from(profile)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles"
)]
pub async fn create_profile(
    State(db): State<Database>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_location()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let profile = services::create_profile(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn update_profile(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    update_req
        .validate_location()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let updated = services::update_profile(db.pool(), id, &update_req).await?;

    Ok(Json(ProfileResponse::from(updated)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/face-map",
    responses(
        (status = 200, description = "Profiles opted in to the face map", body = Vec<FaceMapEntry>)
    ),
    tag = "profiles"
)]
pub async fn get_face_map(State(db): State<Database>) -> Result<Response, WebError> {
    let faces = services::face_map(db.pool()).await?;

    Ok(Json(faces).into_response())
}
