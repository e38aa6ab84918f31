use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_profile, get_face_map, get_profile, update_profile};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_profile))
        .route("/:id", put(update_profile))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:id", get(get_profile))
        .merge(protected)
}

pub fn face_map_routes() -> Router<Database> {
    Router::new().route("/", get(get_face_map))
}
