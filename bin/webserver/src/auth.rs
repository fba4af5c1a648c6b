//! Authentication routes exposed to the hosting console.
//!
//! The hosting framework performs the OAuth dance itself; these routes
//! are the seam it calls into afterwards. Specific rejection reasons
//! stay in the process logs; responses carry only generic messages.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flightdeck_platform_access::{
    AuthenticationError, OAuthResponse, OidcSecurityManager, SecurityManager, UserInfo,
    WebAuthSettings,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    /// The installed security manager.
    pub security_manager: OidcSecurityManager,
    /// Settings the hosting framework reads.
    pub settings: WebAuthSettings,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(security_manager: OidcSecurityManager, settings: WebAuthSettings) -> Self {
        Self {
            security_manager,
            settings,
        }
    }
}

/// Body of the user-info callback: which provider produced the token
/// response, and the response itself.
#[derive(Debug, Deserialize)]
pub struct UserInfoRequest {
    pub provider: String,
    pub response: OAuthResponse,
}

/// Provider entry for the login page: display data only, no credentials.
#[derive(Debug, Serialize)]
pub struct LoginProvider {
    pub name: String,
    pub icon: String,
}

/// Resolves user information from an OAuth token response.
///
/// An unknown provider answers `200` with an empty mapping so the
/// hosting framework falls back to its default handling.
pub async fn oauth_user_info(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UserInfoRequest>,
) -> Result<Response, AuthError> {
    match state
        .security_manager
        .get_oauth_user_info(&request.provider, &request.response)
    {
        Ok(UserInfo::Resolved(identity)) => Ok(Json(identity).into_response()),
        Ok(UserInfo::UnknownProvider) => Ok(Json(serde_json::json!({})).into_response()),
        Err(err @ AuthenticationError::Unauthorized { .. }) => Err(AuthError::AccessDenied(err)),
        Err(err) => Err(AuthError::LoginFailed(err)),
    }
}

/// Lists the registered providers for the login page.
pub async fn providers(State(state): State<Arc<AppState>>) -> Json<Vec<LoginProvider>> {
    let providers = state
        .security_manager
        .registry()
        .providers()
        .iter()
        .map(|p| LoginProvider {
            name: p.name.clone(),
            icon: p.icon.clone(),
        })
        .collect();
    Json(providers)
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Authentication failures mapped to generic HTTP responses.
#[derive(Debug)]
pub enum AuthError {
    /// Token could not be verified.
    LoginFailed(AuthenticationError),
    /// Token verified but grants no console role.
    AccessDenied(AuthenticationError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::LoginFailed(err) => {
                tracing::error!(error = %err, "Login failed");
                (StatusCode::UNAUTHORIZED, "Login failed")
            }
            Self::AccessDenied(err) => {
                tracing::error!(error = %err, "Access denied");
                (
                    StatusCode::FORBIDDEN,
                    "Access denied - you are not authorized to use this platform",
                )
            }
        };

        (status, message).into_response()
    }
}
