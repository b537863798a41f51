//! HTTP Integration Tests for the Guild Read Path
//!
//! Tests guild listing, the projected channel hierarchy, the permission flag
//! catalog, and failure classification when the directory cannot be read.
//!
//! Run with: `cargo test --test guilds_http_test -- --nocapture`

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use gb_server::directory::memory::MemoryDirectory;
use gb_server::directory::{
    Directory, DirectoryError, GuildSnapshot, GuildSummary, NewRole, Role, RoleEdit, RolePosition,
};
use helpers::{id, seeded_app, TestApp, GUILD};

// ============================================================================
// Guild Listing
// ============================================================================

#[tokio::test]
async fn test_list_guilds_returns_summaries() {
    let directory = MemoryDirectory::new();
    directory.insert_guild(helpers::fixture_guild());
    let mut second = helpers::fixture_guild();
    second.id = id(0xB000);
    second.name = "Another Guild".into();
    directory.insert_guild(second);
    let app = TestApp::new(directory);

    let (status, body) = app.get("/api/guilds").await;
    assert_eq!(status, 200);

    let guilds = body.as_array().expect("array of guilds");
    assert_eq!(guilds.len(), 2);
    // Deterministic order: name ascending.
    assert_eq!(guilds[0]["name"], "Another Guild");
    assert_eq!(guilds[1]["name"], "Ops Guild");
    assert_eq!(guilds[1]["id"], id(GUILD).to_string());
}

#[tokio::test]
async fn test_list_guilds_empty_directory() {
    let app = TestApp::new(MemoryDirectory::new());
    let (status, body) = app.get("/api/guilds").await;
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([]));
}

// ============================================================================
// Guild Detail Projection
// ============================================================================

#[tokio::test]
async fn test_guild_detail_projects_channel_tree() {
    let app = seeded_app();

    let (status, body) = app.get(&helpers::guild_path()).await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], id(GUILD).to_string());
    assert_eq!(body["name"], "Ops Guild");

    let channels = body["channels"].as_array().expect("channel nodes");
    assert_eq!(channels.len(), 3, "two categories plus the synthetic bucket");

    // Categories in position order, each with its channels in global order.
    assert_eq!(channels[0]["id"], id(0x10).to_string());
    assert_eq!(channels[0]["name"], "Operations");
    assert_eq!(channels[0]["position"], 0);
    let ops_children = channels[0]["channels"].as_array().unwrap();
    assert_eq!(ops_children.len(), 2);
    assert_eq!(ops_children[0]["name"], "incidents");
    assert_eq!(ops_children[0]["kind"], "text");
    assert_eq!(ops_children[1]["name"], "standup");

    assert_eq!(channels[1]["id"], id(0x11).to_string());
    assert_eq!(channels[1]["channels"].as_array().unwrap().len(), 1);

    // Synthetic bucket: null id, fixed name, no position field, always last.
    assert_eq!(channels[2]["id"], serde_json::Value::Null);
    assert_eq!(channels[2]["name"], "No Category");
    assert!(channels[2].get("position").is_none());
    let stray = channels[2]["channels"].as_array().unwrap();
    assert_eq!(stray.len(), 1);
    assert_eq!(stray[0]["name"], "orphaned");
}

#[tokio::test]
async fn test_guild_detail_roles_sorted_most_senior_first() {
    let app = seeded_app();

    let (status, body) = app.get(&helpers::guild_path()).await;
    assert_eq!(status, 200);

    let roles = body["roles"].as_array().expect("role summaries");
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0]["name"], "operators");
    assert_eq!(roles[0]["position"], 5);
    assert_eq!(roles[1]["name"], "everyone");

    // Bitfields cross the boundary as decimal strings.
    assert_eq!(roles[0]["permissions"], (1u64 << 22).to_string());
    assert_eq!(roles[1]["permissions"], "0");
}

#[tokio::test]
async fn test_guild_detail_overwrites_are_role_scoped() {
    let app = seeded_app();

    let (_, body) = app.get(&helpers::guild_path()).await;
    let incidents = &body["channels"][0]["channels"][0];
    assert_eq!(incidents["name"], "incidents");

    // The member-scoped overwrite on the same channel is dropped.
    let overwrites = incidents["overwrites"].as_array().unwrap();
    assert_eq!(overwrites.len(), 1);
    assert_eq!(overwrites[0]["role_id"], id(0x31).to_string());
    assert_eq!(overwrites[0]["allow"], "16");
    assert_eq!(overwrites[0]["deny"], "0");
}

#[tokio::test]
async fn test_guild_detail_empty_guild() {
    let directory = MemoryDirectory::new();
    let mut seed = helpers::fixture_guild();
    seed.channels.clear();
    seed.roles.clear();
    seed.overwrites.clear();
    directory.insert_guild(seed);
    let app = TestApp::new(directory);

    let (status, body) = app.get(&helpers::guild_path()).await;
    assert_eq!(status, 200);
    assert_eq!(body["channels"], serde_json::json!([]));
    assert_eq!(body["roles"], serde_json::json!([]));
}

#[tokio::test]
async fn test_guild_detail_unknown_guild_returns_404() {
    let app = seeded_app();

    let (status, body) = app.get(&format!("/api/guilds/{}", Uuid::from_u128(0xFFFF))).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
}

// ============================================================================
// Permission Flag Catalog
// ============================================================================

#[tokio::test]
async fn test_permission_flags_are_decimal_strings() {
    let app = seeded_app();

    let (status, body) = app.get("/api/permissions").await;
    assert_eq!(status, 200);

    let flags = body.as_object().expect("flag mapping");
    assert!(!flags.is_empty());
    for (name, value) in flags {
        let raw = value.as_str().unwrap_or_else(|| panic!("{name} is not a string"));
        raw.parse::<u64>()
            .unwrap_or_else(|_| panic!("{name} is not a decimal value: {raw}"));
    }

    assert_eq!(flags["SEND_MESSAGES"], "1");
    assert_eq!(flags["MANAGE_AUTOMATIONS"], (1u64 << 56).to_string());
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = seeded_app();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

// ============================================================================
// Directory Failure Classification
// ============================================================================

/// Directory stub whose read path is down.
struct UnreachableDirectory;

#[async_trait]
impl Directory for UnreachableDirectory {
    async fn list_guilds(&self) -> Result<Vec<GuildSummary>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".into()))
    }

    async fn snapshot(&self, _guild_id: Uuid) -> Result<GuildSnapshot, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".into()))
    }

    async fn create_role(
        &self,
        _guild_id: Uuid,
        _role: NewRole,
    ) -> Result<Role, DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }

    async fn edit_role(
        &self,
        _guild_id: Uuid,
        _role_id: Uuid,
        _edit: RoleEdit,
    ) -> Result<Role, DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }

    async fn delete_role(&self, _guild_id: Uuid, _role_id: Uuid) -> Result<(), DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }

    async fn set_role_positions(
        &self,
        _guild_id: Uuid,
        _positions: Vec<RolePosition>,
    ) -> Result<(), DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }

    async fn upsert_overwrite(
        &self,
        _guild_id: Uuid,
        _channel_id: Uuid,
        _role_id: Uuid,
        _allow: u64,
        _deny: u64,
    ) -> Result<(), DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }

    async fn remove_overwrite(
        &self,
        _guild_id: Uuid,
        _channel_id: Uuid,
        _role_id: Uuid,
    ) -> Result<(), DirectoryError> {
        Err(DirectoryError::Rejected("missing privilege".into()))
    }
}

#[tokio::test]
async fn test_unreadable_snapshot_maps_to_server_error() {
    let app = TestApp::with_directory(Arc::new(UnreachableDirectory));

    let (status, body) = app.get(&helpers::guild_path()).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "snapshot_unavailable");
    assert_eq!(body["message"], "connection refused");
}

#[tokio::test]
async fn test_directory_rejection_surfaces_detail_verbatim() {
    let app = TestApp::with_directory(Arc::new(UnreachableDirectory));

    let (status, body) = app
        .post(
            &helpers::roles_path(),
            serde_json::json!({"name": "admins"}),
        )
        .await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "upstream_rejected");
    assert_eq!(body["message"], "missing privilege");
}
