//! Guild API Type Definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::directory::ChannelKind;

// ============================================================================
// Projected Hierarchy
// ============================================================================

/// Role entry in a guild detail response, most senior first.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RoleSummary {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    #[serde(with = "crate::permissions::bitfield")]
    #[schema(value_type = String)]
    pub permissions: u64,
    pub position: i32,
}

/// Role-principal overwrite view attached to a hierarchy node.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OverwriteView {
    pub role_id: Uuid,
    #[serde(with = "crate::permissions::bitfield")]
    #[schema(value_type = String)]
    pub allow: u64,
    #[serde(with = "crate::permissions::bitfield")]
    #[schema(value_type = String)]
    pub deny: u64,
}

/// Channel leaf in the projected tree.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ChannelNode {
    pub id: Uuid,
    pub name: String,
    pub kind: ChannelKind,
    pub position: i32,
    pub overwrites: Vec<OverwriteView>,
}

/// Top-level node: a real category, or the synthetic "No Category" bucket
/// (`id: null`, no position, always last).
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CategoryNode {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    pub overwrites: Vec<OverwriteView>,
    pub channels: Vec<ChannelNode>,
}

/// Guild detail response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct GuildDetail {
    pub id: Uuid,
    pub name: String,
    pub roles: Vec<RoleSummary>,
    pub channels: Vec<CategoryNode>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Request to create a guild role. `permissions` is a decimal-string
/// bitfield; absent means none.
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: String,
    pub color: Option<String>,
    pub permissions: Option<String>,
}

/// Request to update a guild role. Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Role name must be 1-100 characters"))]
    pub name: Option<String>,
    pub color: Option<String>,
    pub permissions: Option<String>,
}

/// Request to set a channel overwrite. Absent bitfields default to zero.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetOverwriteRequest {
    pub allow: Option<String>,
    pub deny: Option<String>,
}
