//! Guildboard Server
//!
//! Backend for a guild administration dashboard: projects directory snapshots
//! into a deterministic, client-ready channel hierarchy and reconciles role
//! and permission-overwrite mutations against the upstream directory service.

pub mod api;
pub mod config;
pub mod directory;
pub mod guild;
pub mod permissions;
