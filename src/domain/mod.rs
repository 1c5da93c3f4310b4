//! Domain module
//!
//! Core domain types and business logic.

pub mod allowed_roles;
pub mod context;
pub mod error;
pub mod ids;
pub mod permissions;

pub use allowed_roles::AllowedRoleSet;
pub use context::{AuthorizationContext, PrivilegedRoles};
pub use error::CommandError;
pub use ids::{ApplicationId, GuildId, RoleId, UserId};
pub use permissions::Permissions;
