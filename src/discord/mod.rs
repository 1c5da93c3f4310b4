//! Discord module
//!
//! Wire models, the slash command schema, request signature verification and
//! the REST client used for membership changes.

pub mod client;
pub mod commands;
pub mod models;
pub mod signature;

pub use client::{DiscordApiError, DiscordClient, GuildApi};
pub use commands::{command_definitions, CommandDefinition, CommandOptionDefinition, OptionType};
pub use models::{
    CommandData, CommandOption, Interaction, InteractionResponse, InteractionType, Member, User,
};
pub use signature::{SignatureError, SignatureVerifier};
