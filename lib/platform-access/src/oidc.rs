//! OIDC (OpenID Connect) provider configuration.
//!
//! This module provides configuration types for connecting to the
//! external identity provider the console delegates login to.

use serde::{Deserialize, Serialize};

use crate::policy::RoleRule;
use crate::role::Role;

/// Configuration for the OIDC identity provider.
///
/// Exactly one provider is configured per deployment. The provider is
/// addressed by `provider_name` in the authentication callback, and its
/// OAuth endpoints are derived from `issuer_url` (see
/// [`ProviderRegistration`](crate::provider::ProviderRegistration)).
///
/// Fields with defaults can be omitted when loading from environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// The OIDC issuer URL (e.g. "https://auth.example.com/realms/main").
    /// Also the endpoint the realm public key is fetched from at startup.
    issuer_url: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The provider name used in registration and callback dispatch.
    provider_name: String,
    /// Icon hint for the login page.
    /// Default: "fa-key"
    #[serde(default = "default_icon")]
    icon: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,email,profile"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Expected audience of access tokens. Defaults to the client ID.
    #[serde(default)]
    audience: Option<String>,
    /// Mapping from upstream realm roles to console roles.
    /// Default: members of "pipeline-squad" get Admin and User.
    #[serde(default = "default_role_rules")]
    role_rules: Vec<RoleRule>,
}

fn default_icon() -> String {
    "fa-key".to_string()
}

fn default_scopes() -> String {
    "openid,email,profile".to_string()
}

fn default_role_rules() -> Vec<RoleRule> {
    vec![RoleRule::new(
        "pipeline-squad",
        vec![Role::Admin, Role::User],
    )]
}

impl OidcConfig {
    /// Creates a new OIDC configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        provider_name: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            provider_name,
            icon: default_icon(),
            scopes: default_scopes(),
            audience: None,
            role_rules: default_role_rules(),
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        provider_name: String,
    ) -> OidcConfigBuilder {
        OidcConfigBuilder::new(issuer_url, client_id, client_secret, provider_name)
    }

    /// Returns the OIDC issuer URL.
    #[must_use]
    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the configured provider name.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Returns the login-page icon hint.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the OAuth2 scopes to request, parsed from the
    /// comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.split(',').map(str::trim).collect()
    }

    /// Returns the raw scopes string.
    #[must_use]
    pub fn scopes_raw(&self) -> &str {
        &self.scopes
    }

    /// Returns the audience access tokens must carry. Tokens are minted
    /// for the console's own client, so this is the client ID unless
    /// explicitly overridden.
    #[must_use]
    pub fn audience(&self) -> &str {
        self.audience.as_deref().unwrap_or(&self.client_id)
    }

    /// Returns the role mapping rule table.
    #[must_use]
    pub fn role_rules(&self) -> &[RoleRule] {
        &self.role_rules
    }
}

/// Builder for `OidcConfig`.
#[derive(Debug)]
pub struct OidcConfigBuilder {
    issuer_url: String,
    client_id: String,
    client_secret: String,
    provider_name: String,
    icon: String,
    scopes: Vec<String>,
    audience: Option<String>,
    role_rules: Vec<RoleRule>,
}

impl OidcConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        provider_name: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            provider_name,
            icon: default_icon(),
            scopes: vec![
                "openid".to_string(),
                "email".to_string(),
                "profile".to_string(),
            ],
            audience: None,
            role_rules: default_role_rules(),
        }
    }

    /// Sets the login-page icon hint.
    #[must_use]
    pub fn icon(mut self, icon: String) -> Self {
        self.icon = icon;
        self
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: String) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Overrides the expected token audience.
    #[must_use]
    pub fn audience(mut self, audience: String) -> Self {
        self.audience = Some(audience);
        self
    }

    /// Replaces the role mapping rule table.
    #[must_use]
    pub fn role_rules(mut self, rules: Vec<RoleRule>) -> Self {
        self.role_rules = rules;
        self
    }

    /// Builds the `OidcConfig`.
    #[must_use]
    pub fn build(self) -> OidcConfig {
        OidcConfig {
            issuer_url: self.issuer_url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            provider_name: self.provider_name,
            icon: self.icon,
            scopes: self.scopes.join(","),
            audience: self.audience,
            role_rules: self.role_rules,
        }
    }
}
