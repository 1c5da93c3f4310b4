//! Command definitions
//!
//! Typed form of each slash command, validated before dispatch.

use crate::discord::{CommandData, CommandOption, OptionType};
use crate::domain::{CommandError, RoleId, UserId};

/// Target of a grant or ungrant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub user: UserId,
    pub role: RoleId,
}

impl RoleAssignment {
    pub fn new(user: UserId, role: RoleId) -> Self {
        Self { user, role }
    }
}

/// A validated slash command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Grant(RoleAssignment),
    Ungrant(RoleAssignment),
    Roles,
    Add { role: RoleId },
    Remove { role: RoleId },
}

impl Command {
    /// Parse command data. Unknown command names yield `Ok(None)`.
    pub fn parse(data: &CommandData) -> Result<Option<Self>, CommandError> {
        let options = &data.options;
        let command = match data.name.as_str() {
            "grant" => Command::Grant(assignment(options)?),
            "ungrant" => Command::Ungrant(assignment(options)?),
            "roles" => Command::Roles,
            "add" => Command::Add {
                role: RoleId::new(snowflake(options, "role", OptionType::Role)?),
            },
            "remove" => Command::Remove {
                role: RoleId::new(snowflake(options, "role", OptionType::Role)?),
            },
            _ => return Ok(None),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Grant(_) => "grant",
            Command::Ungrant(_) => "ungrant",
            Command::Roles => "roles",
            Command::Add { .. } => "add",
            Command::Remove { .. } => "remove",
        }
    }
}

fn assignment(options: &[CommandOption]) -> Result<RoleAssignment, CommandError> {
    let user = UserId::new(snowflake(options, "user", OptionType::User)?);
    let role = RoleId::new(snowflake(options, "role", OptionType::Role)?);
    Ok(RoleAssignment::new(user, role))
}

fn snowflake(
    options: &[CommandOption],
    name: &str,
    kind: OptionType,
) -> Result<String, CommandError> {
    let option = options
        .iter()
        .find(|o| o.name == name)
        .ok_or_else(|| CommandError::InvalidOptions(format!("missing option `{}`", name)))?;

    if option.kind != kind.code() {
        return Err(CommandError::InvalidOptions(format!(
            "option `{}` has type {}, expected {}",
            name,
            option.kind,
            kind.code()
        )));
    }

    match option.value.as_ref().and_then(|v| v.as_str()) {
        Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => Ok(id.to_string()),
        _ => Err(CommandError::InvalidOptions(format!(
            "option `{}` is not a valid id",
            name
        ))),
    }
}
