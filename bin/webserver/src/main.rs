//! Authentication webserver for the Flightdeck console.
//!
//! Startup order matters: the realm public key is fetched before the
//! server binds, so no request is ever served without a verification
//! key. A failed fetch aborts the process.

mod auth;
mod config;

use auth::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use config::ServerConfig;
use flightdeck_platform_access::{OidcSecurityManager, VerificationKey};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        provider = %config.oidc.provider_name(),
        auth_method = ?config.auth.auth_method,
        user_registration = config.auth.user_registration,
        registration_role = %config.auth.user_registration_role,
        roles_sync_at_login = config.auth.roles_sync_at_login,
        "Loaded configuration"
    );

    // Fetch the realm public key before serving anything
    tracing::info!(issuer = %config.oidc.issuer_url(), "Fetching realm public key...");
    let http_client = reqwest::Client::new();
    let key = VerificationKey::fetch(&http_client, config.oidc.issuer_url())
        .await
        .expect("failed to fetch realm public key");

    let security_manager = OidcSecurityManager::new(&config.oidc, key);
    let state = Arc::new(AppState::new(security_manager, config.auth));

    let app = Router::new()
        .route("/healthz", get(auth::healthz))
        .route("/auth/providers", get(auth::providers))
        .route("/auth/userinfo", post(auth::oauth_user_info))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
