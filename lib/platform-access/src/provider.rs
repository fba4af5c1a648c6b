//! Provider registration and lookup.
//!
//! A [`ProviderRegistration`] is the static block the hosting
//! framework's OAuth client machinery consumes: display metadata,
//! client credentials, and endpoint URLs. The endpoints follow the
//! realm server's well-known layout and are derived from the issuer URL
//! rather than configured one by one.
//!
//! The [`ProviderRegistry`] replaces name-matching in the callback with
//! an explicit lookup: a miss is an answer ("no such provider"), not an
//! error, and the authenticator turns it into
//! [`UserInfo::UnknownProvider`](crate::security::UserInfo::UnknownProvider).

use serde::{Deserialize, Serialize};

use crate::oidc::OidcConfig;

/// Response key under which the provider delivers the access token.
pub const TOKEN_KEY: &str = "access_token";

/// Remote application parameters for the OAuth client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteApp {
    /// OAuth2 client ID.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// OIDC discovery document URL.
    pub server_metadata_url: String,
    /// Base URL for the provider's protocol endpoints.
    pub api_base_url: String,
    /// Scopes in wire form (space-separated).
    pub scope: String,
    /// Token endpoint URL.
    pub access_token_url: String,
    /// Authorization endpoint URL.
    pub authorize_url: String,
}

/// A registered identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistration {
    /// Provider name, matched against the callback's `provider` argument.
    pub name: String,
    /// Icon hint for the login page.
    pub icon: String,
    /// Key under which the token response carries the access token.
    pub token_key: String,
    /// OAuth client parameters.
    pub remote_app: RemoteApp,
}

impl ProviderRegistration {
    /// Builds the registration block for the configured provider,
    /// deriving endpoint URLs from the issuer's well-known layout.
    #[must_use]
    pub fn from_oidc_config(config: &OidcConfig) -> Self {
        let issuer = config.issuer_url().trim_end_matches('/');
        let api_base_url = format!("{issuer}/protocol/openid-connect");

        Self {
            name: config.provider_name().to_string(),
            icon: config.icon().to_string(),
            token_key: TOKEN_KEY.to_string(),
            remote_app: RemoteApp {
                client_id: config.client_id().to_string(),
                client_secret: config.client_secret().to_string(),
                server_metadata_url: format!("{issuer}/.well-known/openid-configuration"),
                api_base_url: api_base_url.clone(),
                scope: config.scopes().join(" "),
                access_token_url: format!("{api_base_url}/token"),
                authorize_url: format!("{api_base_url}/auth"),
            },
        }
    }
}

/// The closed set of providers this deployment accepts logins from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistry {
    providers: Vec<ProviderRegistration>,
}

impl ProviderRegistry {
    /// Creates a registry over the given registrations.
    #[must_use]
    pub fn new(providers: Vec<ProviderRegistration>) -> Self {
        Self { providers }
    }

    /// Creates a registry with a single provider.
    #[must_use]
    pub fn single(provider: ProviderRegistration) -> Self {
        Self::new(vec![provider])
    }

    /// Looks up a provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProviderRegistration> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Returns all registrations.
    #[must_use]
    pub fn providers(&self) -> &[ProviderRegistration] {
        &self.providers
    }
}
