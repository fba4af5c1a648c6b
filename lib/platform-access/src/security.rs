//! The security-manager extension point and its OIDC implementation.
//!
//! The hosting framework completes the OAuth code exchange itself and
//! then asks the installed security manager to turn the token response
//! into user information. [`OidcSecurityManager`] implements that
//! callback for the single registered provider: verify the access
//! token's signature against the startup-fetched realm key, check the
//! audience, map realm roles through the policy table, and hand back a
//! normalized identity record.
//!
//! Each invocation is independent; there is no per-login state here.

use jsonwebtoken::{Algorithm, Validation, decode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::claims::AccessTokenClaims;
use crate::error::AuthenticationError;
use crate::identity::UserIdentity;
use crate::key::VerificationKey;
use crate::oidc::OidcConfig;
use crate::policy::RoleMappingPolicy;
use crate::provider::{ProviderRegistration, ProviderRegistry};

/// Token response delivered by the hosting framework after the code
/// exchange. Carries at least the access token; anything else the
/// provider returned rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthResponse {
    /// The provider-issued access token (a signed JWT).
    pub access_token: String,
    /// Remaining fields of the token response.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl OAuthResponse {
    /// Creates a response carrying only an access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            extra: HashMap::new(),
        }
    }
}

/// Outcome of the user-info callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInfo {
    /// Identity resolved from the configured provider.
    Resolved(UserIdentity),
    /// The provider name matched no registration. The hosting framework
    /// treats this as "no information available" and falls back to its
    /// default handling; it is not a failure.
    UnknownProvider,
}

/// The extension point the hosting framework invokes after an OAuth
/// code exchange completes.
pub trait SecurityManager {
    /// Resolves user information from a provider's token response.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::TokenInvalid`] when the token
    /// cannot be verified and [`AuthenticationError::Unauthorized`]
    /// when it verifies but grants no console role. An unrecognized
    /// provider name is a successful [`UserInfo::UnknownProvider`].
    fn get_oauth_user_info(
        &self,
        provider: &str,
        response: &OAuthResponse,
    ) -> Result<UserInfo, AuthenticationError>;
}

/// Security manager delegating login to the configured OIDC provider.
#[derive(Debug, Clone)]
pub struct OidcSecurityManager {
    registry: ProviderRegistry,
    key: VerificationKey,
    audience: String,
    policy: RoleMappingPolicy,
}

impl OidcSecurityManager {
    /// Creates the security manager from provider configuration and the
    /// startup-fetched realm key.
    #[must_use]
    pub fn new(config: &OidcConfig, key: VerificationKey) -> Self {
        Self {
            registry: ProviderRegistry::single(ProviderRegistration::from_oidc_config(config)),
            key,
            audience: config.audience().to_string(),
            policy: RoleMappingPolicy::new(config.role_rules().to_vec()),
        }
    }

    /// Returns the provider registry.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Returns the role mapping policy.
    #[must_use]
    pub fn policy(&self) -> &RoleMappingPolicy {
        &self.policy
    }

    /// Decodes and verifies an access token against the realm key.
    ///
    /// The realm publishes RSA key material, so verification is pinned
    /// to RS256; an HMAC-signed token has no valid verification path
    /// against a public key. The audience must equal the console's
    /// client identifier, and expiry is enforced by the decoder.
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthenticationError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);

        let data = decode::<AccessTokenClaims>(token, self.key.decoding_key(), &validation)
            .map_err(|e| AuthenticationError::TokenInvalid {
                reason: e.to_string(),
            })?;

        Ok(data.claims)
    }
}

impl SecurityManager for OidcSecurityManager {
    fn get_oauth_user_info(
        &self,
        provider: &str,
        response: &OAuthResponse,
    ) -> Result<UserInfo, AuthenticationError> {
        let Some(registration) = self.registry.get(provider) else {
            tracing::debug!(provider, "No provider registered under this name");
            return Ok(UserInfo::UnknownProvider);
        };

        tracing::debug!(
            provider = %registration.name,
            token = %response.access_token,
            "Verifying access token"
        );

        let claims = self.verify(&response.access_token)?;
        tracing::debug!(?claims, "Access token verified");

        let groups = claims.realm_roles();
        tracing::debug!(roles = ?groups, "Realm roles extracted");

        let role_keys = self.policy.map(groups);
        if role_keys.is_empty() {
            tracing::warn!(
                subject = %claims.subject(),
                "Login rejected: no realm role maps to a console role"
            );
            return Err(AuthenticationError::Unauthorized {
                subject: claims.subject().to_string(),
            });
        }

        let identity = UserIdentity::from_claims(&claims, role_keys);
        tracing::debug!(?identity, "User identity resolved");

        Ok(UserInfo::Resolved(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::{RsaPrivateKey, RsaPublicKey};
    use serde_json::json;

    fn test_manager() -> OidcSecurityManager {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("generate key");
        let der = RsaPublicKey::from(&private_key)
            .to_public_key_der()
            .expect("encode");
        let key = VerificationKey::from_der_base64(&STANDARD.encode(der.as_bytes()))
            .expect("verification key");

        let config = OidcConfig::new(
            "https://identity.example.edu/realms/infrastructure".to_string(),
            "flightdeck".to_string(),
            "client-secret".to_string(),
            "platform-identity".to_string(),
        );
        OidcSecurityManager::new(&config, key)
    }

    #[test]
    fn unknown_provider_is_not_an_error() {
        let manager = test_manager();
        let response = OAuthResponse::new("irrelevant");

        let result = manager
            .get_oauth_user_info("github", &response)
            .expect("should not fail");
        assert_eq!(result, UserInfo::UnknownProvider);
    }

    #[test]
    fn unknown_provider_never_touches_the_token() {
        let manager = test_manager();
        // A garbage token must not matter when the provider is unknown.
        let response = OAuthResponse::new("not-a-jwt");

        let result = manager.get_oauth_user_info("someone-else", &response);
        assert_eq!(result, Ok(UserInfo::UnknownProvider));
    }

    #[test]
    fn garbage_token_is_token_invalid() {
        let manager = test_manager();
        let response = OAuthResponse::new("not-a-jwt");

        let err = manager
            .get_oauth_user_info("platform-identity", &response)
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::TokenInvalid { .. }));
    }

    #[test]
    fn oauth_response_keeps_extra_fields() {
        let response: OAuthResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "Bearer",
            "expires_in": 300
        }))
        .expect("deserialize");

        assert_eq!(response.access_token, "abc");
        assert_eq!(response.extra.get("token_type"), Some(&json!("Bearer")));
        assert_eq!(response.extra.get("expires_in"), Some(&json!(300)));
    }

    #[test]
    fn manager_registers_the_configured_provider() {
        let manager = test_manager();
        assert!(manager.registry().get("platform-identity").is_some());
        assert_eq!(manager.policy().rules()[0].group, "pipeline-squad");
    }
}
