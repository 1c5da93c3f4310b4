//! role_warden Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod discord;
pub mod domain;
pub mod handlers;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use error::AppError;
pub use domain::{AllowedRoleSet, AuthorizationContext, CommandError, PrivilegedRoles};
pub use domain::{GuildId, RoleId, UserId};
