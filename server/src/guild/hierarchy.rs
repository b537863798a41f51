//! Guild hierarchy projection.
//!
//! Builds the client-facing tree for one guild from a flat directory
//! snapshot: categories in display order, each carrying its channels, plus a
//! trailing synthetic bucket for channels whose parent cannot be resolved.
//! The tree is rebuilt from scratch on every read; nothing here caches.

use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use super::types::{CategoryNode, ChannelNode, GuildDetail, OverwriteView, RoleSummary};
use crate::directory::{Channel, GuildSnapshot, Overwrite, PrincipalKind, Role};

/// Name of the synthetic bucket for channels without a resolvable category.
pub const UNCATEGORIZED_NAME: &str = "No Category";

/// Project a flat snapshot into the guild detail payload.
#[must_use]
pub fn project(snapshot: &GuildSnapshot) -> GuildDetail {
    GuildDetail {
        id: snapshot.id,
        name: snapshot.name.clone(),
        roles: role_summaries(&snapshot.roles),
        channels: channel_tree(&snapshot.channels, &snapshot.overwrites),
    }
}

/// Role summaries ordered most senior first (position descending, id
/// ascending on ties).
#[must_use]
pub fn role_summaries(roles: &[Role]) -> Vec<RoleSummary> {
    let mut summaries: Vec<RoleSummary> = roles
        .iter()
        .map(|role| RoleSummary {
            id: role.id,
            name: role.name.clone(),
            color: role.color.clone(),
            permissions: role.permissions,
            position: role.position,
        })
        .collect();
    summaries.sort_by(|a, b| b.position.cmp(&a.position).then_with(|| a.id.cmp(&b.id)));
    summaries
}

/// Group non-category channels under their owning category.
///
/// Categories come out sorted by position; channels keep their global sort
/// order inside each bucket (stable partition, no per-bucket re-sort). A
/// `parent_id` that does not resolve to a known category behaves exactly like
/// no parent: the channel lands in the trailing "No Category" bucket, which
/// exists only when at least one channel needs it.
#[must_use]
pub fn channel_tree(channels: &[Channel], overwrites: &[Overwrite]) -> Vec<CategoryNode> {
    let mut categories: Vec<&Channel> =
        channels.iter().filter(|c| c.kind.is_category()).collect();
    categories.sort_by(|a, b| sibling_order(a, b));

    let mut others: Vec<&Channel> = channels.iter().filter(|c| !c.kind.is_category()).collect();
    others.sort_by(|a, b| sibling_order(a, b));

    let mut nodes: Vec<CategoryNode> = categories
        .iter()
        .map(|category| CategoryNode {
            id: Some(category.id),
            name: category.name.clone(),
            position: Some(category.position),
            overwrites: overwrite_views(category.id, overwrites),
            channels: Vec::new(),
        })
        .collect();

    let index: HashMap<Uuid, usize> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| node.id.map(|id| (id, i)))
        .collect();

    let mut uncategorized = Vec::new();
    for channel in others {
        let node = ChannelNode {
            id: channel.id,
            name: channel.name.clone(),
            kind: channel.kind,
            position: channel.position,
            overwrites: overwrite_views(channel.id, overwrites),
        };
        match channel.parent_id.and_then(|parent| index.get(&parent)) {
            Some(&slot) => nodes[slot].channels.push(node),
            None => uncategorized.push(node),
        }
    }

    if !uncategorized.is_empty() {
        nodes.push(CategoryNode {
            id: None,
            name: UNCATEGORIZED_NAME.to_string(),
            position: None,
            overwrites: Vec::new(),
            channels: uncategorized,
        });
    }

    nodes
}

/// Sibling sort: position ascending, id ascending on ties.
fn sibling_order(a: &Channel, b: &Channel) -> Ordering {
    a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id))
}

/// Role-principal overwrites for one channel, ordered by principal id.
/// Member-scoped overwrites are out of scope for role management and dropped.
fn overwrite_views(channel_id: Uuid, overwrites: &[Overwrite]) -> Vec<OverwriteView> {
    let mut views: Vec<OverwriteView> = overwrites
        .iter()
        .filter(|o| o.channel_id == channel_id && o.kind == PrincipalKind::Role)
        .map(|o| OverwriteView {
            role_id: o.principal_id,
            allow: o.allow,
            deny: o.deny,
        })
        .collect();
    views.sort_by_key(|view| view.role_id);
    views
}
