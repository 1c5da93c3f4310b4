//! Common test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use ed25519_dalek::{Signer, SigningKey};
use tempfile::TempDir;

use role_warden::api::{self, AppState};
use role_warden::discord::{
    CommandDefinition, DiscordApiError, GuildApi, Member, SignatureVerifier, User,
};
use role_warden::domain::ApplicationId;
use role_warden::handlers::CommandHandler;
use role_warden::store::AllowedRoleStore;
use role_warden::{GuildId, PrivilegedRoles, RoleId, UserId};

pub const GUILD: &str = "300";
pub const ADMIN_ROLE: &str = "1000";
pub const SUPPORT_ROLE: &str = "2000";

/// Guild membership kept in memory
#[derive(Default)]
pub struct MemoryGuild {
    members: Mutex<HashMap<UserId, Vec<RoleId>>>,
}

impl MemoryGuild {
    pub fn with_member(self, user: &str) -> Self {
        self.members
            .lock()
            .unwrap()
            .insert(UserId::new(user), Vec::new());
        self
    }

    pub fn roles_of(&self, user: &str) -> Vec<RoleId> {
        self.members
            .lock()
            .unwrap()
            .get(&UserId::new(user))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl GuildApi for MemoryGuild {
    async fn current_user(&self) -> Result<User, DiscordApiError> {
        Ok(User {
            id: UserId::new("4242"),
            username: "role-warden".to_string(),
        })
    }

    async fn register_guild_commands(
        &self,
        _application_id: &ApplicationId,
        _guild_id: &GuildId,
        _commands: &[CommandDefinition],
    ) -> Result<(), DiscordApiError> {
        Ok(())
    }

    async fn fetch_member(
        &self,
        _guild_id: &GuildId,
        user_id: &UserId,
    ) -> Result<Member, DiscordApiError> {
        let members = self.members.lock().unwrap();
        members
            .get(user_id)
            .map(|roles| Member {
                user: None,
                roles: roles.clone(),
                permissions: Default::default(),
            })
            .ok_or(DiscordApiError::Status {
                status: 404,
                body: "Unknown Member".to_string(),
            })
    }

    async fn add_member_role(
        &self,
        _guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError> {
        let mut members = self.members.lock().unwrap();
        let roles = members.entry(user_id.clone()).or_default();
        if !roles.contains(role_id) {
            roles.push(role_id.clone());
        }
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild_id: &GuildId,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<(), DiscordApiError> {
        if let Some(roles) = self.members.lock().unwrap().get_mut(user_id) {
            roles.retain(|r| r != role_id);
        }
        Ok(())
    }
}

/// Router wired to an in-memory guild and a temporary state file
pub struct TestApp {
    pub router: Router,
    pub guild: Arc<MemoryGuild>,
    pub key: SigningKey,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new(guild: MemoryGuild) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = AllowedRoleStore::open(dir.path().join("db.json")).await;

        let guild = Arc::new(guild);
        let handler = CommandHandler::new(
            guild.clone(),
            store,
            PrivilegedRoles::new(RoleId::new(ADMIN_ROLE), RoleId::new(SUPPORT_ROLE)),
            GuildId::new(GUILD),
        );

        let key = SigningKey::from_bytes(&[3u8; 32]);
        let verifier = SignatureVerifier::new(key.verifying_key());
        let router = api::build_router(AppState::new(handler, verifier));

        Self {
            router,
            guild,
            key,
            dir,
        }
    }

    /// Build a correctly signed interactions request
    pub fn signed_request(&self, body: &serde_json::Value) -> Request<Body> {
        let body = serde_json::to_vec(body).unwrap();
        let timestamp = "1700000000";

        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(&body);
        let signature = hex::encode(self.key.sign(&message).to_bytes());

        Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header("X-Signature-Ed25519", signature)
            .header("X-Signature-Timestamp", timestamp)
            .body(Body::from(body))
            .unwrap()
    }

    pub fn state_file(&self) -> std::path::PathBuf {
        self.dir.path().join("db.json")
    }
}

/// Slash command interaction invoked by a member holding `roles`
pub fn command(name: &str, roles: &[&str], options: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "type": 2,
        "guild_id": GUILD,
        "member": {
            "user": { "id": "9", "username": "caller" },
            "roles": roles,
            "permissions": "0"
        },
        "data": { "name": name, "options": options }
    })
}
