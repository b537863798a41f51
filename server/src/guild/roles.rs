//! Guild role management handlers.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::api::AppState;
use crate::directory::{DirectoryError, NewRole, Role, RoleEdit, RolePosition};

use super::types::{CreateRoleRequest, UpdateRoleRequest};

// ============================================================================
// Error Types
// ============================================================================

/// Structural validation failures for a bulk reorder request.
///
/// Rejection happens before anything reaches the directory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Request body must be an array of role positions")]
    InvalidShape,

    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Guild not found")]
    GuildNotFound,

    #[error("Role not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Reorder(#[from] ReorderError),

    #[error("Directory rejected the request: {0}")]
    Upstream(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for RoleError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::GuildNotFound => Self::GuildNotFound,
            DirectoryError::RoleNotFound | DirectoryError::ChannelNotFound => Self::NotFound,
            DirectoryError::Rejected(detail) => Self::Upstream(detail),
            DirectoryError::Unavailable(detail) => Self::Unavailable(detail),
        }
    }
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::GuildNotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Guild not found"}),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": "Role not found"}),
            ),
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({"error": "validation", "message": msg}),
            ),
            Self::Reorder(err) => {
                let code = match err {
                    ReorderError::InvalidShape => "invalid_request_shape",
                    ReorderError::InvalidEntry { .. } => "invalid_entry",
                };
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({"error": code, "message": err.to_string()}),
                )
            }
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
// Reorder Validation
// ============================================================================

/// Validate a raw reorder body into position entries.
///
/// Accepts partial reorders; positions need not be contiguous, but must be
/// distinct integers, and every role id must parse. Contiguity, completeness,
/// and role existence are the directory's concern, not ours.
pub fn validate_reorder(body: &serde_json::Value) -> Result<Vec<RolePosition>, ReorderError> {
    let entries = body.as_array().ok_or(ReorderError::InvalidShape)?;

    let mut positions = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let object = entry
            .as_object()
            .ok_or_else(|| invalid_entry(index, "expected an object"))?;

        let role = object
            .get("role")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| invalid_entry(index, "missing role id"))?;
        let role: Uuid = role
            .parse()
            .map_err(|_| invalid_entry(index, "malformed role id"))?;

        let position = object
            .get("position")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| invalid_entry(index, "position must be an integer"))?;
        let position = i32::try_from(position)
            .map_err(|_| invalid_entry(index, "position out of range"))?;

        if !seen.insert(position) {
            return Err(invalid_entry(index, "duplicate position"));
        }
        positions.push(RolePosition { role, position });
    }
    Ok(positions)
}

fn invalid_entry(index: usize, reason: &str) -> ReorderError {
    ReorderError::InvalidEntry {
        index,
        reason: reason.to_string(),
    }
}

fn parse_bitfield(raw: &str) -> Result<u64, RoleError> {
    raw.parse::<u64>().map_err(|_| {
        RoleError::Validation(format!(
            "permissions must be a non-negative decimal string, got {raw:?}"
        ))
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new role. The directory assigns id and position.
///
/// `POST /api/guilds/:guild_id/roles`
#[tracing::instrument(skip(state, body))]
pub async fn create_role(
    State(state): State<AppState>,
    Path(guild_id): Path<Uuid>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), RoleError> {
    body.validate()
        .map_err(|e| RoleError::Validation(e.to_string()))?;
    let permissions = body
        .permissions
        .as_deref()
        .map(parse_bitfield)
        .transpose()?
        .unwrap_or(0);

    let role = state
        .directory
        .create_role(
            guild_id,
            NewRole {
                name: body.name,
                color: body.color,
                permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(role)))
}

/// Apply a partial edit to a role.
///
/// `PATCH /api/guilds/:guild_id/roles/:role_id`
#[tracing::instrument(skip(state, body))]
pub async fn update_role(
    State(state): State<AppState>,
    Path((guild_id, role_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<Role>, RoleError> {
    body.validate()
        .map_err(|e| RoleError::Validation(e.to_string()))?;
    let permissions = body
        .permissions
        .as_deref()
        .map(parse_bitfield)
        .transpose()?;

    let role = state
        .directory
        .edit_role(
            guild_id,
            role_id,
            RoleEdit {
                name: body.name,
                color: body.color,
                permissions,
            },
        )
        .await?;

    Ok(Json(role))
}

/// Delete a role.
///
/// `DELETE /api/guilds/:guild_id/roles/:role_id`
#[tracing::instrument(skip(state))]
pub async fn delete_role(
    State(state): State<AppState>,
    Path((guild_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, RoleError> {
    state.directory.delete_role(guild_id, role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk reorder roles.
///
/// The body is validated structurally, then forwarded verbatim to the
/// directory. Partial reorders are permitted.
///
/// `PATCH /api/guilds/:guild_id/roles`
#[tracing::instrument(skip(state, body))]
pub async fn reorder_roles(
    State(state): State<AppState>,
    Path(guild_id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, RoleError> {
    let positions = validate_reorder(&body)?;
    state
        .directory
        .set_role_positions(guild_id, positions)
        .await?;

    Ok(Json(
        serde_json::json!({"success": true, "message": "Roles reordered successfully."}),
    ))
}
