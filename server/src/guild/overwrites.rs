//! Channel permission overwrite handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

use crate::api::AppState;
use crate::directory::DirectoryError;

use super::types::SetOverwriteRequest;

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum OverwriteError {
    #[error("Guild not found")]
    GuildNotFound,

    #[error("Channel not found")]
    ChannelNotFound,

    #[error("Role not found")]
    RoleNotFound,

    #[error("{field} must be a non-negative decimal string")]
    InvalidBitfield { field: &'static str },

    #[error("Directory rejected the request: {0}")]
    Upstream(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for OverwriteError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::GuildNotFound => Self::GuildNotFound,
            DirectoryError::ChannelNotFound => Self::ChannelNotFound,
            DirectoryError::RoleNotFound => Self::RoleNotFound,
            DirectoryError::Rejected(detail) => Self::Upstream(detail),
            DirectoryError::Unavailable(detail) => Self::Unavailable(detail),
        }
    }
}

impl IntoResponse for OverwriteError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::GuildNotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Guild not found"}),
            ),
            Self::ChannelNotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Channel not found"}),
            ),
            Self::RoleNotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Role not found"}),
            ),
            Self::InvalidBitfield { .. } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({"error": "invalid_bitfield", "message": self.to_string()}),
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

/// Create or replace a role's overwrite on a channel.
///
/// Bits set in both allow and deny pass through untouched; resolving that
/// conflict is the directory's semantics, not ours.
///
/// `PUT /api/guilds/:guild_id/channels/:channel_id/overwrites/:role_id`
#[tracing::instrument(skip(state, body))]
pub async fn set_overwrite(
    State(state): State<AppState>,
    Path((guild_id, channel_id, role_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(body): Json<SetOverwriteRequest>,
) -> Result<Json<serde_json::Value>, OverwriteError> {
    let allow = parse_bitfield(body.allow.as_deref(), "allow")?;
    let deny = parse_bitfield(body.deny.as_deref(), "deny")?;

    state
        .directory
        .upsert_overwrite(guild_id, channel_id, role_id, allow, deny)
        .await?;

    Ok(Json(serde_json::json!({"success": true})))
}

/// Remove a role's overwrite from a channel.
///
/// Removing an absent overwrite succeeds; only an unknown guild or channel is
/// an error.
///
/// `DELETE /api/guilds/:guild_id/channels/:channel_id/overwrites/:role_id`
#[tracing::instrument(skip(state))]
pub async fn delete_overwrite(
    State(state): State<AppState>,
    Path((guild_id, channel_id, role_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, OverwriteError> {
    state
        .directory
        .remove_overwrite(guild_id, channel_id, role_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Absent bitfields default to zero; present ones must be non-negative
/// decimal strings. Nothing else is checked here.
fn parse_bitfield(raw: Option<&str>, field: &'static str) -> Result<u64, OverwriteError> {
    raw.map_or(Ok(0), |value| {
        value
            .parse::<u64>()
            .map_err(|_| OverwriteError::InvalidBitfield { field })
    })
}
