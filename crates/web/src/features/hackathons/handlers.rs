use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        hackathon::{CreateHackathonRequest, HackathonFilterQuery, UpdateHackathonRequest},
    },
    models::Hackathon,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons",
    params(HackathonFilterQuery),
    responses(
        (status = 200, description = "Normalized hackathons matching every active filter, in stored order", body = Vec<Hackathon>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "hackathons"
)]
pub async fn list_hackathons(
    State(db): State<Database>,
    Query(query): Query<HackathonFilterQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let filter = query.to_filter_state();
    let hackathons = services::list_hackathons(db.pool(), &filter, services::today()).await?;

    Ok(Json(hackathons).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/list",
    params(HackathonFilterQuery, PaginationParams),
    responses(
        (status = 200, description = "One page of filtered hackathons", body = PaginatedResponse<Hackathon>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "hackathons"
)]
pub async fn list_hackathons_paginated(
    State(db): State<Database>,
    Query(query): Query<HackathonFilterQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;
    pagination.validate().map_err(WebError::BadRequest)?;

    let filter = query.to_filter_state();
    let hackathons = services::list_hackathons(db.pool(), &filter, services::today()).await?;

    Ok(Json(PaginatedResponse::from_items(hackathons, &pagination)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon ID")
    ),
    responses(
        (status = 200, description = "Hackathon found", body = Hackathon),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn get_hackathon(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let hackathon = services::get_hackathon(db.pool(), id, services::today()).await?;

    Ok(Json(hackathon).into_response())
}

#[utoipa::path(
    post,
    path = "/api/hackathons",
    request_body = CreateHackathonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Hackathon submitted", body = Hackathon),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Submitting profile does not exist")
    ),
    tag = "hackathons"
)]
pub async fn create_hackathon(
    State(db): State<Database>,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_consistency()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let hackathon = services::create_hackathon(db.pool(), req, services::today()).await?;

    Ok((StatusCode::CREATED, Json(hackathon)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon ID")
    ),
    request_body = UpdateHackathonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Hackathon updated", body = Hackathon),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn update_hackathon(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateHackathonRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    update_req
        .validate_consistency()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let updated =
        services::update_hackathon(db.pool(), id, &update_req, services::today()).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Hackathon deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn delete_hackathon(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_hackathon(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
