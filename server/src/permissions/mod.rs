//! Permission flag catalog and bitfield plumbing.
//!
//! The catalog is immutable after process start and shared by every request;
//! entity bitfields themselves are carried as raw `u64` values and are never
//! truncated to the known flag set.

pub mod bitfield;
pub mod flags;

pub use flags::Permissions;

use std::collections::BTreeMap;

use axum::routing::get;
use axum::{Json, Router};

use crate::api::AppState;

/// Create the permissions router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_flags))
}

/// Enumerate all named permission flags with their bit values.
///
/// `GET /api/permissions`
async fn list_flags() -> Json<BTreeMap<&'static str, String>> {
    Json(
        Permissions::catalog()
            .map(|(name, flag)| (name, flag.bits().to_string()))
            .collect(),
    )
}
