//! External directory service contract.
//!
//! The directory owns every persisted entity; this crate only ever reads
//! point-in-time snapshots and forwards mutations. The trait keeps the core a
//! consumer of values rather than a holder of shared mutable state.

pub mod memory;
pub mod models;

pub use models::{
    Channel, ChannelKind, GuildSnapshot, GuildSummary, NewRole, Overwrite, PrincipalKind, Role,
    RoleEdit, RolePosition,
};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Guild not found")]
    GuildNotFound,

    #[error("Channel not found")]
    ChannelNotFound,

    #[error("Role not found")]
    RoleNotFound,

    /// The directory refused the operation; detail surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The directory could not be read at all.
    #[error("{0}")]
    Unavailable(String),
}

/// Read and mutation contract of the directory service.
///
/// Reads return whole snapshots; no operation is retried here, and a
/// multi-step mutation that fails partway leaves the directory in whatever
/// state its own partial-failure semantics produce.
#[async_trait]
pub trait Directory: Send + Sync + 'static {
    /// Enumerate all known guilds.
    async fn list_guilds(&self) -> Result<Vec<GuildSummary>, DirectoryError>;

    /// Fetch the flat entity snapshot for one guild.
    async fn snapshot(&self, guild_id: Uuid) -> Result<GuildSnapshot, DirectoryError>;

    /// Create a role; the directory assigns id and position.
    async fn create_role(&self, guild_id: Uuid, role: NewRole) -> Result<Role, DirectoryError>;

    /// Apply a partial edit to a role, returning the updated record.
    async fn edit_role(
        &self,
        guild_id: Uuid,
        role_id: Uuid,
        edit: RoleEdit,
    ) -> Result<Role, DirectoryError>;

    /// Delete a role.
    async fn delete_role(&self, guild_id: Uuid, role_id: Uuid) -> Result<(), DirectoryError>;

    /// Apply a validated bulk reorder. Partial reorders are permitted.
    async fn set_role_positions(
        &self,
        guild_id: Uuid,
        positions: Vec<RolePosition>,
    ) -> Result<(), DirectoryError>;

    /// Create or replace a role principal's overwrite on a channel.
    async fn upsert_overwrite(
        &self,
        guild_id: Uuid,
        channel_id: Uuid,
        role_id: Uuid,
        allow: u64,
        deny: u64,
    ) -> Result<(), DirectoryError>;

    /// Remove a role principal's overwrite from a channel. Removing an absent
    /// overwrite succeeds.
    async fn remove_overwrite(
        &self,
        guild_id: Uuid,
        channel_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), DirectoryError>;
}
