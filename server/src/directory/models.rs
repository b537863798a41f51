//! Directory entity models.
//!
//! Raw, flat shapes as the directory service hands them over. Everything here
//! is a request-scoped copy; the directory remains the owner of record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Guild summary for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GuildSummary {
    pub id: Uuid,
    pub name: String,
}

/// Channel kind discriminant.
///
/// Closed set: `Category` is the only kind that can own children; every other
/// kind is an ordinary channel. An unrecognized kind is a deserialization
/// error, never a silent fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Category,
    Text,
    Voice,
}

impl ChannelKind {
    #[must_use]
    pub const fn is_category(self) -> bool {
        matches!(self, Self::Category)
    }
}

/// Channel as stored by the directory. Categories are channels too, with
/// `kind == Category` and no parent of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub kind: ChannelKind,
    /// Owning category; only meaningful for non-category kinds.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    /// Ordering key, unique only within the sibling scope.
    pub position: i32,
}

/// Guild role. Higher position = more senior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(with = "crate::permissions::bitfield")]
    pub permissions: u64,
    pub position: i32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Principal a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Role,
    Member,
}

/// Per-channel, per-principal allow/deny bitfield pair.
///
/// At most one record exists per `(channel, kind, principal)` triple. A bit
/// absent from both fields inherits from the parent scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overwrite {
    pub channel_id: Uuid,
    pub kind: PrincipalKind,
    pub principal_id: Uuid,
    #[serde(with = "crate::permissions::bitfield")]
    pub allow: u64,
    #[serde(with = "crate::permissions::bitfield")]
    pub deny: u64,
}

/// Point-in-time flat view of one guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildSnapshot {
    pub id: Uuid,
    pub name: String,
    pub channels: Vec<Channel>,
    pub roles: Vec<Role>,
    pub overwrites: Vec<Overwrite>,
}

/// Payload for creating a role.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub color: Option<String>,
    pub permissions: u64,
}

/// Partial role edit; `None` keeps the existing value.
#[derive(Debug, Clone, Default)]
pub struct RoleEdit {
    pub name: Option<String>,
    pub color: Option<String>,
    pub permissions: Option<u64>,
}

/// One entry of a bulk role reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePosition {
    pub role: Uuid,
    pub position: i32,
}
