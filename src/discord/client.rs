//! Discord REST client
//!
//! `GuildApi` is the seam between the command handler and the platform.
//! `DiscordClient` is the production implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

use crate::domain::{ApplicationId, GuildId, RoleId, UserId};

use super::commands::CommandDefinition;
use super::models::{Member, User};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("DiscordBot (role_warden, ", env!("CARGO_PKG_VERSION"), ")");

/// Errors returned by the REST API
#[derive(Debug, thiserror::Error)]
pub enum DiscordApiError {
    /// Transport failure (connect, timeout, decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
}

impl DiscordApiError {
    /// Check if the target does not exist (e.g. user left the guild)
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscordApiError::Status { status: 404, .. })
    }
}

/// Operations the bot needs from the platform
#[async_trait]
pub trait GuildApi: Send + Sync {
    /// Identity of the bot user; its id doubles as the application id
    async fn current_user(&self) -> Result<User, DiscordApiError>;

    /// Bulk-overwrite the guild's slash commands
    async fn register_guild_commands(
        &self,
        application_id: &ApplicationId,
        guild_id: &GuildId,
        commands: &[CommandDefinition],
    ) -> Result<(), DiscordApiError>;

    async fn fetch_member(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> Result<Member, DiscordApiError>;

    async fn add_member_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError>;

    async fn remove_member_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError>;
}

/// REST client authenticated with the bot token
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DiscordClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, DiscordApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bot {}", self.token))
    }

    async fn check(response: Response) -> Result<Response, DiscordApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DiscordApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn member_role_path(guild_id: &GuildId, user_id: &UserId, role_id: &RoleId) -> String {
        format!("/guilds/{}/members/{}/roles/{}", guild_id, user_id, role_id)
    }
}

#[async_trait]
impl GuildApi for DiscordClient {
    async fn current_user(&self) -> Result<User, DiscordApiError> {
        let response = self.request(Method::GET, "/users/@me").send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn register_guild_commands(
        &self,
        application_id: &ApplicationId,
        guild_id: &GuildId,
        commands: &[CommandDefinition],
    ) -> Result<(), DiscordApiError> {
        let path = format!("/applications/{}/guilds/{}/commands", application_id, guild_id);
        let response = self.request(Method::PUT, &path).json(commands).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_member(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
    ) -> Result<Member, DiscordApiError> {
        let path = format!("/guilds/{}/members/{}", guild_id, user_id);
        let response = self.request(Method::GET, &path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn add_member_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError> {
        let path = Self::member_role_path(guild_id, user_id, role_id);
        let response = self.request(Method::PUT, &path).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError> {
        let path = Self::member_role_path(guild_id, user_id, role_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
