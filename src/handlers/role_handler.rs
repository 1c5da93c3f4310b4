//! Role Command Handler
//!
//! Authorizes each invocation, then edits the allow-list or the target
//! member's roles.

use std::sync::Arc;

use crate::discord::{
    command_definitions, DiscordApiError, GuildApi, Interaction, InteractionResponse,
    InteractionType, User,
};
use crate::domain::{
    ApplicationId, AuthorizationContext, CommandError, GuildId, PrivilegedRoles, RoleId,
};
use crate::store::AllowedRoleStore;

use super::commands::{Command, RoleAssignment};

/// Handler for the five role commands
pub struct CommandHandler {
    api: Arc<dyn GuildApi>,
    store: AllowedRoleStore,
    privileged: PrivilegedRoles,
    guild_id: GuildId,
}

impl CommandHandler {
    pub fn new(
        api: Arc<dyn GuildApi>,
        store: AllowedRoleStore,
        privileged: PrivilegedRoles,
        guild_id: GuildId,
    ) -> Self {
        Self {
            api,
            store,
            privileged,
            guild_id,
        }
    }

    pub fn store(&self) -> &AllowedRoleStore {
        &self.store
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Fetch the bot identity and register the guild commands.
    ///
    /// Failing to fetch the identity is returned to the caller; a failed
    /// registration is only logged so existing registrations stay usable.
    pub async fn on_ready(&self) -> Result<User, DiscordApiError> {
        let me = self.api.current_user().await?;
        tracing::info!(user_id = %me.id, "Logged in as {}", me.username);

        let application_id = ApplicationId::new(me.id.as_str());
        match self
            .api
            .register_guild_commands(&application_id, &self.guild_id, &command_definitions())
            .await
        {
            Ok(()) => tracing::info!("Registered slash commands to guild {}", self.guild_id),
            Err(e) => tracing::error!(error = %e, guild_id = %self.guild_id, "Failed to register commands"),
        }

        Ok(me)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Handle an interaction. `None` means the event gets no reply.
    pub async fn handle(&self, interaction: &Interaction) -> Option<InteractionResponse> {
        match interaction.kind {
            InteractionType::Ping => Some(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => {
                let data = interaction.data.as_ref()?;
                let invoker = interaction.invoker().map(|u| u.id.to_string());

                let command = match Command::parse(data) {
                    Ok(Some(command)) => command,
                    Ok(None) => {
                        tracing::debug!(command = %data.name, "Ignoring unknown command");
                        return None;
                    }
                    Err(e) => {
                        tracing::warn!(command = %data.name, invoker = ?invoker, error = %e, "Rejected command options");
                        return Some(InteractionResponse::ephemeral(e.reply_message()));
                    }
                };

                let auth = self.authorize(interaction);
                let guild_id = interaction.guild_id.as_ref().unwrap_or(&self.guild_id);
                let name = command.name();

                let content = match self.execute(command, auth, guild_id).await {
                    Ok(content) => {
                        tracing::info!(command = name, invoker = ?invoker, "Command completed");
                        content
                    }
                    Err(e) if e.is_denial() => {
                        tracing::info!(command = name, invoker = ?invoker, reason = %e, "Command denied");
                        e.reply_message().to_string()
                    }
                    Err(e) => {
                        tracing::error!(command = name, invoker = ?invoker, error = %e, "Command failed");
                        e.reply_message().to_string()
                    }
                };

                Some(InteractionResponse::ephemeral(content))
            }
            InteractionType::Other(kind) => {
                tracing::debug!(kind, "Ignoring non-command interaction");
                None
            }
        }
    }

    /// Derive what the invoking member may do
    pub fn authorize(&self, interaction: &Interaction) -> AuthorizationContext {
        match &interaction.member {
            Some(member) => {
                AuthorizationContext::derive(&member.roles, member.permissions, &self.privileged)
            }
            None => AuthorizationContext::anonymous(),
        }
    }

    /// Run a validated command and produce the reply text
    pub async fn execute(
        &self,
        command: Command,
        auth: AuthorizationContext,
        guild_id: &GuildId,
    ) -> Result<String, CommandError> {
        match command {
            Command::Grant(target) => self.grant(target, auth, guild_id).await,
            Command::Ungrant(target) => self.ungrant(target, auth, guild_id).await,
            Command::Roles => Ok(self.list_roles().await),
            Command::Add { role } => self.allow_role(role, auth).await,
            Command::Remove { role } => self.disallow_role(role, auth).await,
        }
    }

    // =========================================================================
    // grant / ungrant
    // =========================================================================

    async fn grant(
        &self,
        target: RoleAssignment,
        auth: AuthorizationContext,
        guild_id: &GuildId,
    ) -> Result<String, CommandError> {
        self.check_assignment(&target, auth).await?;
        self.ensure_member(guild_id, &target).await?;

        self.api
            .add_member_role(guild_id, &target.user, &target.role)
            .await
            .map_err(external)?;

        tracing::info!(user_id = %target.user, role_id = %target.role, "Granted role");
        Ok(format!(
            "Granted {} to {}",
            target.role.mention(),
            target.user.mention()
        ))
    }

    async fn ungrant(
        &self,
        target: RoleAssignment,
        auth: AuthorizationContext,
        guild_id: &GuildId,
    ) -> Result<String, CommandError> {
        self.check_assignment(&target, auth).await?;
        self.ensure_member(guild_id, &target).await?;

        self.api
            .remove_member_role(guild_id, &target.user, &target.role)
            .await
            .map_err(external)?;

        tracing::info!(user_id = %target.user, role_id = %target.role, "Removed role");
        Ok(format!(
            "Removed {} from {}",
            target.role.mention(),
            target.user.mention()
        ))
    }

    /// Caller must be support or admin, and the role must be allow-listed
    /// regardless of caller level.
    async fn check_assignment(
        &self,
        target: &RoleAssignment,
        auth: AuthorizationContext,
    ) -> Result<(), CommandError> {
        if !auth.can_assign_roles() {
            return Err(CommandError::AccessDenied);
        }
        if !self.store.contains(&target.role).await {
            return Err(CommandError::RoleNotAllowed);
        }
        Ok(())
    }

    async fn ensure_member(
        &self,
        guild_id: &GuildId,
        target: &RoleAssignment,
    ) -> Result<(), CommandError> {
        self.api
            .fetch_member(guild_id, &target.user)
            .await
            .map(|_| ())
            .map_err(|e| {
                if e.is_not_found() {
                    CommandError::NotAMember
                } else {
                    external(e)
                }
            })
    }

    // =========================================================================
    // roles / add / remove
    // =========================================================================

    async fn list_roles(&self) -> String {
        format!("Allowed roles:\n{}", self.store.snapshot().await.listing())
    }

    async fn allow_role(
        &self,
        role: RoleId,
        auth: AuthorizationContext,
    ) -> Result<String, CommandError> {
        if !auth.can_manage_allow_list() {
            return Err(CommandError::AdminOnly);
        }

        let content = format!("Added {} to allowed roles", role.mention());
        let changed = self
            .store
            .add(role.clone())
            .await
            .map_err(|e| CommandError::Storage(e.to_string()))?;

        tracing::info!(role_id = %role, changed, "Allowed role");
        Ok(content)
    }

    async fn disallow_role(
        &self,
        role: RoleId,
        auth: AuthorizationContext,
    ) -> Result<String, CommandError> {
        if !auth.can_manage_allow_list() {
            return Err(CommandError::AdminOnly);
        }

        let changed = self
            .store
            .remove(&role)
            .await
            .map_err(|e| CommandError::Storage(e.to_string()))?;

        tracing::info!(role_id = %role, changed, "Disallowed role");
        Ok(format!("Removed {} from allowed roles", role.mention()))
    }
}

fn external(e: DiscordApiError) -> CommandError {
    CommandError::ExternalApiFailure(e.to_string())
}
