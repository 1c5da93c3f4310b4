//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::discord::SignatureVerifier;
use crate::domain::{GuildId, RoleId};

/// Default REST API base used when `DISCORD_API_BASE` is not set
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot authentication token
    pub token: String,

    /// Role whose holders may manage the allow-list
    pub admin_role: RoleId,

    /// Role whose holders may grant and ungrant allowed roles
    pub support_role: RoleId,

    /// Guild the commands are registered to
    pub guild_id: GuildId,

    /// Verifier built from the hex-encoded Ed25519 application key
    pub verifier: SignatureVerifier,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Location of the persisted allow-list
    pub db_path: PathBuf,

    /// REST API base URL
    pub api_base: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };

        let token = required("TOKEN")?;
        let admin_role = RoleId::new(required("ADMIN")?);
        let support_role = RoleId::new(required("SUPPORT")?);
        let guild_id = GuildId::new(required("GUILD_ID")?);
        let public_key = required("PUBLIC_KEY")?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let verifier = SignatureVerifier::from_hex(&public_key)
            .map_err(|_| ConfigError::InvalidValue("PUBLIC_KEY"))?;

        let db_path = lookup("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("db.json"));

        let api_base = lookup("DISCORD_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            token,
            admin_role,
            support_role,
            guild_id,
            verifier,
            host,
            port,
            db_path,
            api_base,
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
