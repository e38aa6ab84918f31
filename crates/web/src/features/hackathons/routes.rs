use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_hackathon, delete_hackathon, get_hackathon, list_hackathons,
    list_hackathons_paginated, update_hackathon,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_hackathon))
        .route("/:id", put(update_hackathon))
        .route("/:id", delete(delete_hackathon))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_hackathons))
        .route("/list", get(list_hackathons_paginated))
        .route("/:id", get(get_hackathon))
        .merge(protected)
}
