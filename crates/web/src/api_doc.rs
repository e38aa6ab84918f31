use utoipa::OpenApi;

use crate::features::{hackathons, profiles};

#[derive(OpenApi)]
#[openapi(
    paths(
        hackathons::handlers::list_hackathons,
        hackathons::handlers::list_hackathons_paginated,
        hackathons::handlers::get_hackathon,
        hackathons::handlers::create_hackathon,
        hackathons::handlers::update_hackathon,
        hackathons::handlers::delete_hackathon,
        profiles::handlers::get_profile,
        profiles::handlers::create_profile,
        profiles::handlers::update_profile,
        profiles::handlers::get_face_map,
    ),
    components(
        schemas(
            storage::dto::hackathon::CreateHackathonRequest,
            storage::dto::hackathon::UpdateHackathonRequest,
            storage::dto::profile::CreateProfileRequest,
            storage::dto::profile::UpdateProfileRequest,
            storage::dto::profile::ProfileResponse,
            storage::dto::profile::FaceMapEntry,
            storage::dto::common::PaginationMeta,
            storage::models::Hackathon,
            storage::models::Continent,
            storage::models::EventType,
            storage::models::Coordinates,
            storage::models::SubscriptionTier,
            storage::services::CategoryMode,
        )
    ),
    tags(
        (name = "hackathons", description = "Hackathon directory endpoints"),
        (name = "profiles", description = "Profile and face map endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
