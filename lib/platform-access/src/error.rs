//! Error types for the platform-access crate.
//!
//! Authentication is binary per login attempt: every variant here is
//! terminal for the attempt that produced it. An unrecognized provider
//! name is not an error (see [`UserInfo::UnknownProvider`]) because the
//! hosting framework treats it as "no information available" and falls
//! back to its own handling.
//!
//! [`UserInfo::UnknownProvider`]: crate::security::UserInfo::UnknownProvider

use std::fmt;

/// Errors from authentication operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The startup fetch of the realm public key failed, or the metadata
    /// body did not have the expected shape. Fatal to initialization: no
    /// token can be verified without the key.
    KeyFetch { reason: String },
    /// The access token could not be verified: bad signature, audience
    /// mismatch, expired, or undecodable.
    TokenInvalid { reason: String },
    /// The token verified but its realm roles map to no console role.
    /// Identity is known; access is denied.
    Unauthorized { subject: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyFetch { reason } => {
                write!(f, "failed to obtain realm public key: {reason}")
            }
            Self::TokenInvalid { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::Unauthorized { subject } => {
                write!(f, "user '{subject}' has no role granting console access")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}
