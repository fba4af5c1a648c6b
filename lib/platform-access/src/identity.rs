//! The normalized user-identity record handed back to the console.

use serde::{Deserialize, Serialize};

use crate::claims::AccessTokenClaims;
use crate::role::Role;

/// Identity record produced by a successful login.
///
/// Consumed by the console's security framework to create or update the
/// local user record and session; this crate does not persist it.
/// Identity fields mirror the token's claims and may be absent when the
/// provider omitted them. `role_keys` holds the mapped console roles,
/// never the upstream realm roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Preferred username from the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Console roles assigned to the user for this login.
    pub role_keys: Vec<Role>,
}

impl UserIdentity {
    /// Builds the identity record from verified claims and the mapped
    /// console roles.
    #[must_use]
    pub fn from_claims(claims: &AccessTokenClaims, role_keys: Vec<Role>) -> Self {
        Self {
            username: claims.preferred_username.clone(),
            email: claims.email.clone(),
            first_name: claims.given_name.clone(),
            last_name: claims.family_name.clone(),
            role_keys,
        }
    }
}
