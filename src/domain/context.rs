//! Authorization Context
//!
//! Derived once per invocation from the invoking member and the configured
//! admin/support roles.

use super::{Permissions, RoleId};

/// Configured roles that confer bot privileges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedRoles {
    pub admin: RoleId,
    pub support: RoleId,
}

impl PrivilegedRoles {
    pub fn new(admin: RoleId, support: RoleId) -> Self {
        Self { admin, support }
    }
}

/// What the invoking member is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorizationContext {
    pub is_admin: bool,
    pub is_support: bool,
}

impl AuthorizationContext {
    /// Administrator permission implies both admin and support.
    pub fn derive(
        member_roles: &[RoleId],
        permissions: Permissions,
        privileged: &PrivilegedRoles,
    ) -> Self {
        let administrator = permissions.is_administrator();

        Self {
            is_admin: administrator || member_roles.contains(&privileged.admin),
            is_support: administrator || member_roles.contains(&privileged.support),
        }
    }

    /// Context for an invocation without a guild member
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// May grant and ungrant allowed roles
    pub fn can_assign_roles(&self) -> bool {
        self.is_support || self.is_admin
    }

    /// May edit the allow-list
    pub fn can_manage_allow_list(&self) -> bool {
        self.is_admin
    }
}
