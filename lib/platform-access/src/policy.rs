//! Role mapping policy: upstream realm roles to console roles.
//!
//! The policy is a declarative rule table evaluated once per login. Each
//! rule names an upstream group and the console roles its members
//! receive. The mapping REPLACES the upstream role list entirely; an
//! upstream role with no matching rule contributes nothing, and a login
//! whose mapped role set comes out empty is rejected by the
//! authenticator.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A single mapping rule: membership in `group` grants `grants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    /// Upstream realm role (group) name.
    pub group: String,
    /// Console roles granted to members of the group.
    pub grants: Vec<Role>,
}

impl RoleRule {
    /// Creates a rule granting `grants` to members of `group`.
    #[must_use]
    pub fn new(group: impl Into<String>, grants: Vec<Role>) -> Self {
        Self {
            group: group.into(),
            grants,
        }
    }
}

/// Declarative mapping from upstream group membership to console roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMappingPolicy {
    rules: Vec<RoleRule>,
}

impl RoleMappingPolicy {
    /// Creates a policy from an explicit rule table.
    #[must_use]
    pub fn new(rules: Vec<RoleRule>) -> Self {
        Self { rules }
    }

    /// The platform's standing policy: members of the pipeline squad get
    /// Admin and User; everyone else gets nothing.
    #[must_use]
    pub fn pipeline_squad() -> Self {
        Self::new(vec![RoleRule::new(
            "pipeline-squad",
            vec![Role::Admin, Role::User],
        )])
    }

    /// Returns the rule table.
    #[must_use]
    pub fn rules(&self) -> &[RoleRule] {
        &self.rules
    }

    /// Maps a set of upstream group names to console roles.
    ///
    /// Grants accumulate in rule order without duplicates. An empty
    /// result means the user holds no group that grants console access.
    #[must_use]
    pub fn map(&self, groups: &[String]) -> Vec<Role> {
        let mut roles = Vec::new();
        for rule in &self.rules {
            if groups.iter().any(|g| g == &rule.group) {
                for role in &rule.grants {
                    if !roles.contains(role) {
                        roles.push(*role);
                    }
                }
            }
        }
        roles
    }
}

impl Default for RoleMappingPolicy {
    fn default() -> Self {
        Self::pipeline_squad()
    }
}
