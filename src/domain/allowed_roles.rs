//! Allow-list of grantable roles
//!
//! Keeps insertion order so listings read in the order admins added roles.

use super::RoleId;

/// Placeholder shown when no role has been allowed yet
pub const EMPTY_LISTING: &str = "*No roles configured*";

/// Set of role ids eligible for grant/ungrant. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoleSet {
    roles: Vec<RoleId>,
}

impl AllowedRoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    /// Insert a role; returns false if it was already present
    pub fn insert(&mut self, role: RoleId) -> bool {
        if self.contains(&role) {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Remove a role; returns false if it was not present
    pub fn remove(&mut self, role: &RoleId) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r != role);
        self.roles.len() != before
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn to_vec(&self) -> Vec<RoleId> {
        self.roles.clone()
    }

    /// Newline-joined role mentions, or the placeholder when empty
    pub fn listing(&self) -> String {
        if self.roles.is_empty() {
            return EMPTY_LISTING.to_string();
        }
        self.roles
            .iter()
            .map(RoleId::mention)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<RoleId> for AllowedRoleSet {
    fn from_iter<I: IntoIterator<Item = RoleId>>(iter: I) -> Self {
        let mut set = Self::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}
