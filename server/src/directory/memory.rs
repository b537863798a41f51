//! In-memory directory backend.
//!
//! Stands in for a live upstream directory: a concurrent guild map, mutated
//! in place, optionally seeded from a JSON data file at startup. Snapshot
//! reads clone the guild's state so projection never observes a half-applied
//! mutation.

use std::path::Path;

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{
    Channel, GuildSnapshot, GuildSummary, NewRole, Overwrite, PrincipalKind, Role, RoleEdit,
    RolePosition,
};
use super::{Directory, DirectoryError};
use async_trait::async_trait;

// ============================================================================
// Seed Data
// ============================================================================

/// One guild in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildSeed {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub overwrites: Vec<Overwrite>,
}

/// Root of a JSON seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub guilds: Vec<GuildSeed>,
}

// ============================================================================
// Backend
// ============================================================================

#[derive(Debug)]
struct GuildRecord {
    name: String,
    channels: Vec<Channel>,
    roles: Vec<Role>,
    overwrites: Vec<Overwrite>,
}

/// Concurrent in-memory directory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    guilds: DashMap<Uuid, GuildRecord>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from seed data.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let directory = Self::new();
        for guild in seed.guilds {
            directory.insert_guild(guild);
        }
        directory
    }

    /// Load seed data from a JSON file.
    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        Ok(Self::from_seed(seed))
    }

    /// Insert (or replace) a guild wholesale.
    pub fn insert_guild(&self, seed: GuildSeed) {
        self.guilds.insert(
            seed.id,
            GuildRecord {
                name: seed.name,
                channels: seed.channels,
                roles: seed.roles,
                overwrites: seed.overwrites,
            },
        );
    }

    /// Number of guilds currently held.
    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn list_guilds(&self) -> Result<Vec<GuildSummary>, DirectoryError> {
        let mut guilds: Vec<GuildSummary> = self
            .guilds
            .iter()
            .map(|entry| GuildSummary {
                id: *entry.key(),
                name: entry.value().name.clone(),
            })
            .collect();
        guilds.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(guilds)
    }

    async fn snapshot(&self, guild_id: Uuid) -> Result<GuildSnapshot, DirectoryError> {
        let guild = self
            .guilds
            .get(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;
        Ok(GuildSnapshot {
            id: guild_id,
            name: guild.name.clone(),
            channels: guild.channels.clone(),
            roles: guild.roles.clone(),
            overwrites: guild.overwrites.clone(),
        })
    }

    async fn create_role(&self, guild_id: Uuid, role: NewRole) -> Result<Role, DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;

        // New roles land on top of the existing stack.
        let position = guild.roles.iter().map(|r| r.position).max().unwrap_or(0) + 1;
        let role = Role {
            id: Uuid::now_v7(),
            name: role.name,
            color: role.color,
            permissions: role.permissions,
            position,
            created_at: Utc::now(),
        };
        guild.roles.push(role.clone());
        Ok(role)
    }

    async fn edit_role(
        &self,
        guild_id: Uuid,
        role_id: Uuid,
        edit: RoleEdit,
    ) -> Result<Role, DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;
        let role = guild
            .roles
            .iter_mut()
            .find(|r| r.id == role_id)
            .ok_or(DirectoryError::RoleNotFound)?;

        if let Some(name) = edit.name {
            role.name = name;
        }
        if let Some(color) = edit.color {
            role.color = Some(color);
        }
        if let Some(permissions) = edit.permissions {
            role.permissions = permissions;
        }
        Ok(role.clone())
    }

    async fn delete_role(&self, guild_id: Uuid, role_id: Uuid) -> Result<(), DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;
        let before = guild.roles.len();
        guild.roles.retain(|r| r.id != role_id);
        if guild.roles.len() == before {
            return Err(DirectoryError::RoleNotFound);
        }
        // Deleting a role drops its channel overwrites with it.
        guild
            .overwrites
            .retain(|o| !(o.kind == PrincipalKind::Role && o.principal_id == role_id));
        Ok(())
    }

    async fn set_role_positions(
        &self,
        guild_id: Uuid,
        positions: Vec<RolePosition>,
    ) -> Result<(), DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;

        // Resolve every entry before touching anything.
        for entry in &positions {
            if !guild.roles.iter().any(|r| r.id == entry.role) {
                return Err(DirectoryError::RoleNotFound);
            }
        }
        for entry in positions {
            if let Some(role) = guild.roles.iter_mut().find(|r| r.id == entry.role) {
                role.position = entry.position;
            }
        }
        Ok(())
    }

    async fn upsert_overwrite(
        &self,
        guild_id: Uuid,
        channel_id: Uuid,
        role_id: Uuid,
        allow: u64,
        deny: u64,
    ) -> Result<(), DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;
        if !guild.channels.iter().any(|c| c.id == channel_id) {
            return Err(DirectoryError::ChannelNotFound);
        }
        if !guild.roles.iter().any(|r| r.id == role_id) {
            return Err(DirectoryError::RoleNotFound);
        }

        let existing = guild.overwrites.iter().position(|o| {
            o.channel_id == channel_id
                && o.kind == PrincipalKind::Role
                && o.principal_id == role_id
        });
        match existing {
            Some(slot) => {
                let overwrite = &mut guild.overwrites[slot];
                overwrite.allow = allow;
                overwrite.deny = deny;
            }
            None => guild.overwrites.push(Overwrite {
                channel_id,
                kind: PrincipalKind::Role,
                principal_id: role_id,
                allow,
                deny,
            }),
        }
        Ok(())
    }

    async fn remove_overwrite(
        &self,
        guild_id: Uuid,
        channel_id: Uuid,
        role_id: Uuid,
    ) -> Result<(), DirectoryError> {
        let mut guild = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DirectoryError::GuildNotFound)?;
        if !guild.channels.iter().any(|c| c.id == channel_id) {
            return Err(DirectoryError::ChannelNotFound);
        }
        // Idempotent: removing an absent overwrite is a success.
        guild.overwrites.retain(|o| {
            !(o.channel_id == channel_id
                && o.kind == PrincipalKind::Role
                && o.principal_id == role_id)
        });
        Ok(())
    }
}
