//! Authentication and role mapping for the Flightdeck console.
//!
//! This crate provides:
//! - The security-manager extension point ([`SecurityManager`]) and its
//!   OIDC implementation ([`OidcSecurityManager`])
//! - Provider registration for the hosting framework's OAuth machinery
//!   (`ProviderRegistration`, `ProviderRegistry`)
//! - Startup-fetched realm key material ([`VerificationKey`])
//! - The declarative realm-role to console-role policy
//!   ([`RoleMappingPolicy`])
//! - The normalized identity record ([`UserIdentity`]) and auth settings
//!   ([`WebAuthSettings`])
//!
//! # Access Control Model
//!
//! Login is delegated to one external OIDC provider. After the hosting
//! framework exchanges the authorization code, the access token is
//! verified against the realm public key fetched once at startup. The
//! token's realm roles are then rewritten through the policy table into
//! console roles; a user whose realm roles map to nothing is rejected
//! outright.
//!
//! # Example
//!
//! ```
//! use flightdeck_platform_access::{OidcConfig, Role, RoleMappingPolicy};
//!
//! let config = OidcConfig::new(
//!     "https://identity.example.edu/realms/infrastructure".to_string(),
//!     "flightdeck".to_string(),
//!     "client-secret".to_string(),
//!     "platform-identity".to_string(),
//! );
//!
//! // Derive console roles from the token's realm roles.
//! let policy = RoleMappingPolicy::new(config.role_rules().to_vec());
//! let roles = policy.map(&["pipeline-squad".to_string()]);
//!
//! assert_eq!(roles, vec![Role::Admin, Role::User]);
//! ```

pub mod claims;
pub mod error;
pub mod identity;
pub mod key;
pub mod oidc;
pub mod policy;
pub mod provider;
pub mod role;
pub mod security;
pub mod settings;

// Re-export main types at crate root
pub use claims::{AccessTokenClaims, Audience, RealmAccess};
pub use error::AuthenticationError;
pub use identity::UserIdentity;
pub use key::VerificationKey;
pub use oidc::{OidcConfig, OidcConfigBuilder};
pub use policy::{RoleMappingPolicy, RoleRule};
pub use provider::{ProviderRegistration, ProviderRegistry, RemoteApp, TOKEN_KEY};
pub use role::Role;
pub use security::{OAuthResponse, OidcSecurityManager, SecurityManager, UserInfo};
pub use settings::{AuthMethod, WebAuthSettings};
