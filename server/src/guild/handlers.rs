//! Guild read handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

use crate::api::AppState;
use crate::directory::{DirectoryError, GuildSummary};

use super::hierarchy;
use super::types::GuildDetail;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum GuildError {
    #[error("Guild not found")]
    NotFound,

    #[error("Directory rejected the request: {0}")]
    Upstream(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for GuildError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::GuildNotFound
            | DirectoryError::ChannelNotFound
            | DirectoryError::RoleNotFound => Self::NotFound,
            DirectoryError::Rejected(detail) => Self::Upstream(detail),
            DirectoryError::Unavailable(detail) => Self::Unavailable(detail),
        }
    }
}

impl IntoResponse for GuildError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Guild not found"}),
            ),
            Self::Upstream(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "upstream_rejected", "message": detail}),
            ),
            Self::Unavailable(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "snapshot_unavailable", "message": detail}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// List all guilds known to the directory.
///
/// `GET /api/guilds`
#[tracing::instrument(skip(state))]
pub async fn list_guilds(
    State(state): State<AppState>,
) -> Result<Json<Vec<GuildSummary>>, GuildError> {
    let guilds = state.directory.list_guilds().await?;
    Ok(Json(guilds))
}

/// Guild detail: role summaries plus the projected channel hierarchy.
///
/// The tree is rebuilt from a fresh snapshot on every call so a stale
/// projection is never served.
///
/// `GET /api/guilds/:guild_id`
#[tracing::instrument(skip(state))]
pub async fn get_guild(
    State(state): State<AppState>,
    Path(guild_id): Path<Uuid>,
) -> Result<Json<GuildDetail>, GuildError> {
    let snapshot = state.directory.snapshot(guild_id).await?;
    Ok(Json(hierarchy::project(&snapshot)))
}
