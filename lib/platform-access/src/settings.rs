//! Webserver authentication settings.
//!
//! These are the constants the hosting framework reads when it wires up
//! its security layer: how users authenticate, whether unknown users
//! are auto-registered and with which role, whether roles are re-synced
//! on every login, and the static role-name to permission-set table
//! backing the console's permission storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::role::Role;

/// How the console authenticates users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Local username/password accounts.
    Database,
    /// Delegated login via the registered OAuth/OIDC provider.
    Oauth,
}

/// Authentication settings consumed by the hosting framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAuthSettings {
    /// Authentication method selector.
    /// Default: delegated OAuth.
    #[serde(default = "default_auth_method")]
    pub auth_method: AuthMethod,

    /// Whether users unknown to the console are registered on first
    /// login. Default: true.
    #[serde(default = "default_user_registration")]
    pub user_registration: bool,

    /// Role assigned to newly registered users.
    /// Default: Viewer.
    #[serde(default = "default_user_registration_role")]
    pub user_registration_role: Role,

    /// Whether role assignments are refreshed from the provider on
    /// every login. Default: true.
    #[serde(default = "default_roles_sync_at_login")]
    pub roles_sync_at_login: bool,

    /// Static mapping from role name to permission-set names.
    /// Default: identity mapping over the console's built-in roles.
    #[serde(default = "default_role_mappings")]
    pub role_mappings: BTreeMap<String, Vec<String>>,
}

fn default_auth_method() -> AuthMethod {
    AuthMethod::Oauth
}

fn default_user_registration() -> bool {
    true
}

fn default_user_registration_role() -> Role {
    Role::Viewer
}

fn default_roles_sync_at_login() -> bool {
    true
}

fn default_role_mappings() -> BTreeMap<String, Vec<String>> {
    Role::all()
        .iter()
        .map(|role| (role.as_str().to_string(), vec![role.as_str().to_string()]))
        .collect()
}

impl Default for WebAuthSettings {
    fn default() -> Self {
        Self {
            auth_method: default_auth_method(),
            user_registration: default_user_registration(),
            user_registration_role: default_user_registration_role(),
            roles_sync_at_login: default_roles_sync_at_login(),
            role_mappings: default_role_mappings(),
        }
    }
}
