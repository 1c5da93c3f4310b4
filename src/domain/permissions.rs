//! Platform permission bitfield.
//!
//! The platform sends a member's computed permissions as a decimal string.
//! Only the bits this bot inspects are named; unknown bits are retained.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer};

bitflags! {
    /// Member permissions represented as a 64-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Permission to kick members from the guild
        const KICK_MEMBERS   = 1 << 1;
        /// Permission to ban members from the guild
        const BAN_MEMBERS    = 1 << 2;
        /// Bypasses every other permission check
        const ADMINISTRATOR  = 1 << 3;
        /// Permission to modify guild settings
        const MANAGE_GUILD   = 1 << 5;
        /// Permission to create, edit, and assign roles
        const MANAGE_ROLES   = 1 << 28;
    }
}

impl Permissions {
    /// Parse the wire representation; anything unparsable grants nothing.
    pub fn from_wire(raw: &str) -> Self {
        raw.trim()
            .parse::<u64>()
            .map(Self::from_bits_retain)
            .unwrap_or_else(|_| Self::empty())
    }

    /// Whether the member holds administrator-equivalent rights
    pub fn is_administrator(&self) -> bool {
        self.contains(Self::ADMINISTRATOR)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}
