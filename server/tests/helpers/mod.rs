//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router over a seeded in-memory directory, plus fixture builders for
//! guilds, channels, roles, and overwrites.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use gb_server::api::{create_router, AppState};
use gb_server::config::Config;
use gb_server::directory::memory::{GuildSeed, MemoryDirectory};
use gb_server::directory::{Channel, ChannelKind, Directory, Overwrite, PrincipalKind, Role};

// ============================================================================
// TestApp
// ============================================================================

/// Full application router over an in-memory directory.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build the app from a prepared directory backend.
    pub fn new(directory: MemoryDirectory) -> Self {
        Self::with_directory(Arc::new(directory))
    }

    /// Build the app from any directory implementation.
    pub fn with_directory(directory: Arc<dyn Directory>) -> Self {
        let state = AppState::new(directory, Config::default_for_test());
        Self {
            router: create_router(state),
        }
    }

    /// Send a request; returns status and parsed JSON body (Null when empty).
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, serde_json::Value) {
        self.send(Method::DELETE, path, None).await
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Deterministic test id.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn category(n: u128, name: &str, position: i32) -> Channel {
    Channel {
        id: id(n),
        name: name.into(),
        kind: ChannelKind::Category,
        parent_id: None,
        position,
    }
}

pub fn text_channel(n: u128, name: &str, parent: Option<u128>, position: i32) -> Channel {
    Channel {
        id: id(n),
        name: name.into(),
        kind: ChannelKind::Text,
        parent_id: parent.map(id),
        position,
    }
}

pub fn role(n: u128, name: &str, position: i32, permissions: u64) -> Role {
    Role {
        id: id(n),
        name: name.into(),
        color: None,
        permissions,
        position,
        created_at: chrono::Utc::now(),
    }
}

pub fn role_overwrite(channel: u128, principal: u128, allow: u64, deny: u64) -> Overwrite {
    Overwrite {
        channel_id: id(channel),
        kind: PrincipalKind::Role,
        principal_id: id(principal),
        allow,
        deny,
    }
}

pub fn member_overwrite(channel: u128, principal: u128, allow: u64, deny: u64) -> Overwrite {
    Overwrite {
        channel_id: id(channel),
        kind: PrincipalKind::Member,
        principal_id: id(principal),
        allow,
        deny,
    }
}

/// Standard fixture guild id: two categories, channels under each, one stray
/// channel with a dangling parent, two roles, and mixed overwrites.
pub const GUILD: u128 = 0xA000;

pub fn seeded_app() -> TestApp {
    let directory = MemoryDirectory::new();
    directory.insert_guild(fixture_guild());
    TestApp::new(directory)
}

pub fn fixture_guild() -> GuildSeed {
    GuildSeed {
        id: id(GUILD),
        name: "Ops Guild".into(),
        channels: vec![
            category(0x10, "Operations", 0),
            category(0x11, "Social", 1),
            text_channel(0x20, "incidents", Some(0x10), 0),
            text_channel(0x21, "standup", Some(0x10), 1),
            text_channel(0x22, "random", Some(0x11), 0),
            // Dangling parent reference, lands in the synthetic bucket.
            text_channel(0x23, "orphaned", Some(0xDEAD), 0),
        ],
        roles: vec![
            role(0x30, "everyone", 0, 0),
            role(0x31, "operators", 5, 1 << 22),
        ],
        overwrites: vec![
            role_overwrite(0x20, 0x31, 16, 0),
            member_overwrite(0x20, 0x99, 1, 0),
        ],
    }
}

/// Path helpers keep the route strings in one place.
pub fn guild_path() -> String {
    format!("/api/guilds/{}", id(GUILD))
}

pub fn roles_path() -> String {
    format!("{}/roles", guild_path())
}

pub fn role_path(role: Uuid) -> String {
    format!("{}/roles/{role}", guild_path())
}

pub fn overwrite_path(channel: u128, role: u128) -> String {
    format!(
        "{}/channels/{}/overwrites/{}",
        guild_path(),
        id(channel),
        id(role)
    )
}
