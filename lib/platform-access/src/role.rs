//! Internal role types for the console's permission system.
//!
//! These are the console's own role names, distinct from the upstream
//! identity provider's realm roles. Upstream roles never reach the rest
//! of the console; they are rewritten into this closed set by the
//! [`RoleMappingPolicy`](crate::policy::RoleMappingPolicy) at login.

use serde::{Deserialize, Serialize};

/// A role recognized by the console's permission system.
///
/// Serializes by role name (e.g. `"Admin"`), which is the form the
/// console's security storage expects in `role_keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Operational access: manage runs without editing definitions.
    Op,
    /// Standard interactive access.
    User,
    /// Read-only access.
    Viewer,
    /// Unauthenticated / minimal access.
    Public,
}

impl Role {
    /// Returns the role name as stored by the console.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Op => "Op",
            Self::User => "User",
            Self::Viewer => "Viewer",
            Self::Public => "Public",
        }
    }

    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// All roles known to the console.
    #[must_use]
    pub fn all() -> &'static [Role] {
        &[
            Self::Admin,
            Self::Op,
            Self::User,
            Self::Viewer,
            Self::Public,
        ]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
