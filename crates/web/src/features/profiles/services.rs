use sqlx::PgPool;
use storage::{
    dto::profile::{CreateProfileRequest, FaceMapEntry, UpdateProfileRequest},
    error::Result,
    models::Profile,
    repository::profile::ProfileRepository,
    services::jitter_random,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Profile> {
    let repo = ProfileRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a profile. A face-map location is jittered once, here.
pub async fn create_profile(pool: &PgPool, request: CreateProfileRequest) -> Result<Profile> {
    let coordinates = request.coordinates().map(jitter_random);
    let new_profile = request.into_new_profile(coordinates);

    let repo = ProfileRepository::new(pool);
    let profile = repo.create(&new_profile).await?;
    info!(profile_id = %profile.profile_id, "Profile created");

    Ok(profile)
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateProfileRequest,
) -> WebResult<Profile> {
    let repo = ProfileRepository::new(pool);

    let stored = repo.find_by_id(id).await?;
    request
        .validate_against(&stored)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    Ok(repo.update(id, request).await?)
}

/// Opted-in faces with a usable location.
pub async fn face_map(pool: &PgPool) -> Result<Vec<FaceMapEntry>> {
    let repo = ProfileRepository::new(pool);
    let profiles = repo.list_face_map().await?;

    Ok(profiles
        .into_iter()
        .filter_map(FaceMapEntry::from_profile)
        .collect())
}
