//! Interaction wire models
//!
//! Only the fields the bot reads are modelled; everything else in the payload
//! is ignored by serde.

use serde::{Deserialize, Serialize};

use crate::domain::{GuildId, Permissions, RoleId, UserId};

/// Reply flag that hides the message from everyone but the invoker
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            other => InteractionType::Other(other),
        }
    }
}

/// Incoming interaction event
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Present when invoked inside a guild
    #[serde(default)]
    pub member: Option<Member>,
    /// Present when invoked in a DM
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub data: Option<CommandData>,
}

impl Interaction {
    /// User who triggered the interaction, wherever it happened
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Guild member, as embedded in interactions and returned by the REST API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Only present on interaction payloads
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
}

/// Body returned from the interactions endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MessageData {
    pub content: String,
    pub flags: u64,
    pub allowed_mentions: AllowedMentions,
}

/// Empty `parse` list: mentions render but nobody is pinged
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self { kind: 1, data: None }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: 4,
            data: Some(MessageData {
                content: content.into(),
                flags: EPHEMERAL_FLAG,
                allowed_mentions: AllowedMentions::default(),
            }),
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}
