//! Command Error Types
//!
//! Every variant maps to an ephemeral reply shown to the invoking member.

use thiserror::Error;

/// Reasons a command invocation did not succeed
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    /// Invoker is neither support nor admin
    #[error("Access denied")]
    AccessDenied,

    /// Invoker is not an admin
    #[error("Admin only")]
    AdminOnly,

    /// Target role is not on the allow-list
    #[error("Role not allowed")]
    RoleNotAllowed,

    /// Target user is not in the guild
    #[error("Target user is not a guild member")]
    NotAMember,

    /// Options missing or of the wrong type for a known command
    #[error("Invalid command options: {0}")]
    InvalidOptions(String),

    /// Fetching or mutating the target member failed
    #[error("External API failure: {0}")]
    ExternalApiFailure(String),

    /// Persisting the allow-list failed
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl CommandError {
    /// Text shown to the invoking member. Internal details stay in the logs.
    pub fn reply_message(&self) -> &'static str {
        match self {
            Self::AccessDenied => "Access denied",
            Self::AdminOnly => "Admin only",
            Self::RoleNotAllowed => "Role not allowed",
            Self::NotAMember => "User is not a member of this server",
            Self::InvalidOptions(_) => "Invalid command options",
            Self::ExternalApiFailure(_) => "Failed to update member roles",
            Self::Storage(_) => "Failed to save allowed roles",
        }
    }

    /// Check if this is a denial (caller's fault, nothing was attempted)
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied
                | Self::AdminOnly
                | Self::RoleNotAllowed
                | Self::NotAMember
                | Self::InvalidOptions(_)
        )
    }
}
