//! Named permission flags using bitflags.
//!
//! Flags are organized into categories:
//! - Content (bits 0-5): Message and media permissions
//! - Channel (bits 6-9): Channel visibility and message moderation
//! - Voice (bits 10-16): Voice channel permissions
//! - Moderation (bits 17-20): Member management permissions
//! - Guild Management (bits 21-26): Administrative permissions
//! - Invites (bits 27-28): Invite-related permissions
//! - Automation (bits 53-56): Scheduled events and automation rules

use bitflags::bitflags;

bitflags! {
    /// Permission flags represented as a 64-bit bitfield.
    ///
    /// Bitfield values always cross the API boundary as decimal strings;
    /// combined values with the automation bits set do not survive an f64
    /// round-trip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Permissions: u64 {
        // === Content (bits 0-5) ===
        /// Permission to send text messages in channels
        const SEND_MESSAGES      = 1 << 0;
        /// Permission to embed links in messages (auto-preview)
        const EMBED_LINKS        = 1 << 1;
        /// Permission to attach files to messages
        const ATTACH_FILES       = 1 << 2;
        /// Permission to add reactions to messages
        const ADD_REACTIONS      = 1 << 3;
        /// Permission to use custom emoji from other guilds
        const USE_EXTERNAL_EMOJI = 1 << 4;
        /// Permission to mention @everyone and @here
        const MENTION_EVERYONE   = 1 << 5;

        // === Channel (bits 6-9) ===
        /// Permission to view a channel
        const VIEW_CHANNEL       = 1 << 6;
        /// Permission to read a channel's message history
        const READ_HISTORY       = 1 << 7;
        /// Permission to delete or pin messages from other members
        const MANAGE_MESSAGES    = 1 << 8;
        /// Permission to manage webhooks on a channel
        const MANAGE_WEBHOOKS    = 1 << 9;

        // === Voice (bits 10-16) ===
        /// Permission to connect to voice channels
        const VOICE_CONNECT      = 1 << 10;
        /// Permission to speak in voice channels
        const VOICE_SPEAK        = 1 << 11;
        /// Permission to stream video in voice channels
        const VOICE_VIDEO        = 1 << 12;
        /// Permission to mute other members in voice channels
        const VOICE_MUTE_MEMBERS = 1 << 13;
        /// Permission to deafen other members in voice channels
        const VOICE_DEAFEN_MEMBERS = 1 << 14;
        /// Permission to move members between voice channels
        const VOICE_MOVE_MEMBERS = 1 << 15;
        /// Permission to speak above the per-channel audio ducking
        const PRIORITY_SPEAKER   = 1 << 16;

        // === Moderation (bits 17-20) ===
        /// Permission to kick members from the guild
        const KICK_MEMBERS       = 1 << 17;
        /// Permission to ban members from the guild
        const BAN_MEMBERS        = 1 << 18;
        /// Permission to timeout members (temporary mute)
        const TIMEOUT_MEMBERS    = 1 << 19;
        /// Permission to view the guild audit log
        const VIEW_AUDIT_LOG     = 1 << 20;

        // === Guild Management (bits 21-26) ===
        /// Permission to create, edit, and delete channels
        const MANAGE_CHANNELS    = 1 << 21;
        /// Permission to create, edit, and delete roles
        const MANAGE_ROLES       = 1 << 22;
        /// Permission to modify guild settings
        const MANAGE_GUILD       = 1 << 23;
        /// Permission to manage custom emoji
        const MANAGE_EMOJIS      = 1 << 24;
        /// Permission to change other members' nicknames
        const MANAGE_NICKNAMES   = 1 << 25;
        /// All permissions, bypassing channel overwrites
        const ADMINISTRATOR      = 1 << 26;

        // === Invites (bits 27-28) ===
        /// Permission to create invite links
        const CREATE_INVITE      = 1 << 27;
        /// Permission to manage (revoke) invite links
        const MANAGE_INVITES     = 1 << 28;

        // === Automation (bits 53-56) ===
        /// Permission to create scheduled events
        const CREATE_EVENTS      = 1 << 53;
        /// Permission to edit and cancel scheduled events
        const MANAGE_EVENTS      = 1 << 54;
        /// Permission to trigger automation rules manually
        const USE_AUTOMATIONS    = 1 << 55;
        /// Permission to create, edit, and delete automation rules
        const MANAGE_AUTOMATIONS = 1 << 56;
    }
}

impl Permissions {
    /// Enumerate every named flag with its bit value.
    ///
    /// The enumeration is stable across calls: declaration order, each name
    /// paired with a single-flag value.
    pub fn catalog() -> impl Iterator<Item = (&'static str, Self)> {
        Self::all().iter_names()
    }
}
