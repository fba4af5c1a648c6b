//! Access-token claim types.
//!
//! The shape follows what a Keycloak-style realm server puts in its
//! access tokens: RFC 7519 registered claims, OIDC profile claims, and
//! the realm-level role list nested under `realm_access.roles`. Claims
//! this module does not model explicitly are retained in `additional`
//! so diagnostics see the full decoded payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Claims decoded from a verified access token.
///
/// Identity claims are all optional; a token missing one simply yields
/// an identity record with that field absent. `realm_access` is also
/// optional, and its absence reads as an empty role list, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject: the provider's unique identifier for the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Intended recipient(s) of the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued-at time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Preferred username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Given (first) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Family (last) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Realm-level role membership.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<RealmAccess>,

    /// Claims not modeled above.
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl AccessTokenClaims {
    /// Realm roles carried by the token; empty when `realm_access` is
    /// absent.
    #[must_use]
    pub fn realm_roles(&self) -> &[String] {
        self.realm_access
            .as_ref()
            .map(|access| access.roles.as_slice())
            .unwrap_or_default()
    }

    /// Best identifier available for logs and rejection messages.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.sub
            .as_deref()
            .or(self.preferred_username.as_deref())
            .unwrap_or("unknown")
    }
}

/// Realm-level access block (`realm_access` claim).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    /// Role names assigned to the user within the realm.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Audience claim: a single recipient or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Returns true if `aud` is among the intended recipients.
    #[must_use]
    pub fn contains(&self, aud: &str) -> bool {
        match self {
            Self::Single(s) => s == aud,
            Self::Multiple(list) => list.iter().any(|a| a == aud),
        }
    }
}
