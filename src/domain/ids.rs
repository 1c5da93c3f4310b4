//! Snowflake identifiers
//!
//! The platform encodes every identifier as a decimal string. Each kind of id
//! gets its own newtype so a role can never be passed where a user is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

snowflake_id!(
    /// Guild role identifier
    RoleId
);
snowflake_id!(
    /// User identifier
    UserId
);
snowflake_id!(
    /// Guild (server) identifier
    GuildId
);
snowflake_id!(
    /// Bot application identifier
    ApplicationId
);

impl RoleId {
    /// Mention markup, e.g. `<@&123>`
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl UserId {
    /// Mention markup, e.g. `<@123>`
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}
