//! Slash command schema registered with the guild.

use serde::Serialize;

/// Option types used by this bot's commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum OptionType {
    User,
    Role,
}

impl From<OptionType> for u8 {
    fn from(kind: OptionType) -> Self {
        match kind {
            OptionType::User => 6,
            OptionType::Role => 8,
        }
    }
}

impl OptionType {
    pub fn code(self) -> u8 {
        self.into()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandOptionDefinition {
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOptionDefinition>,
}

fn required(kind: OptionType, name: &'static str, description: &'static str) -> CommandOptionDefinition {
    CommandOptionDefinition {
        kind,
        name,
        description,
        required: true,
    }
}

/// The five commands, in registration order
pub fn command_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition {
            name: "grant",
            description: "Grant an allowed role to a user",
            options: vec![
                required(OptionType::User, "user", "User to grant the role"),
                required(OptionType::Role, "role", "Role to grant"),
            ],
        },
        CommandDefinition {
            name: "ungrant",
            description: "Remove a granted role from a user",
            options: vec![
                required(OptionType::User, "user", "User to remove the role from"),
                required(OptionType::Role, "role", "Role to remove"),
            ],
        },
        CommandDefinition {
            name: "roles",
            description: "List all allowed roles",
            options: vec![],
        },
        CommandDefinition {
            name: "add",
            description: "Admin: Allow a role to be grantable",
            options: vec![required(OptionType::Role, "role", "Role to allow")],
        },
        CommandDefinition {
            name: "remove",
            description: "Admin: Disallow a role from being granted",
            options: vec![required(OptionType::Role, "role", "Role to disallow")],
        },
    ]
}
