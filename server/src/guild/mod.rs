//! Guild Projection and Role Management Module
//!
//! Read side projects directory snapshots into the client-facing hierarchy;
//! write side validates and forwards role and overwrite mutations.

pub mod handlers;
pub mod hierarchy;
pub mod overwrites;
pub mod roles;
pub mod types;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::api::AppState;

/// Create the guild router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_guilds))
        .route("/{id}", get(handlers::get_guild))
        // Role routes
        .route(
            "/{id}/roles",
            post(roles::create_role).patch(roles::reorder_roles),
        )
        .route(
            "/{id}/roles/{role_id}",
            patch(roles::update_role).delete(roles::delete_role),
        )
        // Overwrite routes
        .route(
            "/{id}/channels/{channel_id}/overwrites/{role_id}",
            put(overwrites::set_overwrite).delete(overwrites::delete_overwrite),
        )
}
