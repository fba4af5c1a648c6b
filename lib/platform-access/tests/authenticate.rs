//! End-to-end authentication callback tests with real RS256 tokens.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flightdeck_platform_access::{
    AuthenticationError, OAuthResponse, OidcConfig, OidcSecurityManager, Role, SecurityManager,
    UserInfo, VerificationKey,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Key generation is expensive; share one realm keypair across tests.
static REALM_KEY: LazyLock<RsaPrivateKey> = LazyLock::new(|| {
    RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("generate realm key")
});

fn public_key_b64(private_key: &RsaPrivateKey) -> String {
    let der = RsaPublicKey::from(private_key)
        .to_public_key_der()
        .expect("encode public key");
    STANDARD.encode(der.as_bytes())
}

fn mint_token(private_key: &RsaPrivateKey, claims: &Value) -> String {
    let pem = private_key
        .to_pkcs1_pem(Default::default())
        .expect("private pem");
    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        claims,
        &EncodingKey::from_rsa_pem(pem.as_bytes()).expect("encoding key"),
    )
    .expect("token")
}

fn manager() -> OidcSecurityManager {
    let key = VerificationKey::from_der_base64(&public_key_b64(&REALM_KEY))
        .expect("verification key");
    let config = OidcConfig::new(
        "https://identity.example.edu/realms/infrastructure".to_string(),
        "flightdeck".to_string(),
        "client-secret".to_string(),
        "platform-identity".to_string(),
    );
    OidcSecurityManager::new(&config, key)
}

fn alice_claims(roles: Value) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "iss": "https://identity.example.edu/realms/infrastructure",
        "sub": "u-alice",
        "aud": "flightdeck",
        "iat": now,
        "exp": now + 300,
        "preferred_username": "alice",
        "email": "a@x.edu",
        "given_name": "Alice",
        "family_name": "A",
        "realm_access": {"roles": roles}
    })
}

#[test]
fn valid_token_with_required_role_resolves_identity() {
    let token = mint_token(&REALM_KEY, &alice_claims(json!(["pipeline-squad"])));

    let result = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .expect("authentication should succeed");

    let UserInfo::Resolved(identity) = result else {
        panic!("expected resolved identity, got {result:?}");
    };
    assert_eq!(identity.username.as_deref(), Some("alice"));
    assert_eq!(identity.email.as_deref(), Some("a@x.edu"));
    assert_eq!(identity.first_name.as_deref(), Some("Alice"));
    assert_eq!(identity.last_name.as_deref(), Some("A"));
    assert_eq!(identity.role_keys, vec![Role::Admin, Role::User]);
}

#[test]
fn extra_upstream_roles_do_not_change_role_keys() {
    let token = mint_token(
        &REALM_KEY,
        &alice_claims(json!([
            "offline_access",
            "pipeline-squad",
            "uma_authorization",
            "default-roles-infrastructure"
        ])),
    );

    let result = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .expect("authentication should succeed");

    let UserInfo::Resolved(identity) = result else {
        panic!("expected resolved identity, got {result:?}");
    };
    // Upstream roles are rewritten, never passed through.
    assert_eq!(identity.role_keys, vec![Role::Admin, Role::User]);
}

#[test]
fn token_signed_with_another_key_is_rejected() {
    let other_key =
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("generate other key");
    let token = mint_token(&other_key, &alice_claims(json!(["pipeline-squad"])));

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert!(matches!(err, AuthenticationError::TokenInvalid { .. }));
}

#[test]
fn audience_mismatch_is_rejected() {
    let mut claims = alice_claims(json!(["pipeline-squad"]));
    claims["aud"] = json!("another-console");
    let token = mint_token(&REALM_KEY, &claims);

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert!(matches!(err, AuthenticationError::TokenInvalid { .. }));
}

#[test]
fn expired_token_is_rejected() {
    let now = chrono::Utc::now().timestamp();
    let mut claims = alice_claims(json!(["pipeline-squad"]));
    claims["iat"] = json!(now - 900);
    claims["exp"] = json!(now - 600);
    let token = mint_token(&REALM_KEY, &claims);

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert!(matches!(err, AuthenticationError::TokenInvalid { .. }));
}

#[test]
fn token_without_expiry_is_rejected() {
    let mut claims = alice_claims(json!(["pipeline-squad"]));
    claims.as_object_mut().expect("object").remove("exp");
    let token = mint_token(&REALM_KEY, &claims);

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert!(matches!(err, AuthenticationError::TokenInvalid { .. }));
}

#[test]
fn missing_required_role_is_unauthorized() {
    let token = mint_token(&REALM_KEY, &alice_claims(json!(["other-role"])));

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert_eq!(
        err,
        AuthenticationError::Unauthorized {
            subject: "u-alice".to_string()
        }
    );
}

#[test]
fn absent_realm_access_is_unauthorized() {
    let mut claims = alice_claims(json!([]));
    claims.as_object_mut().expect("object").remove("realm_access");
    let token = mint_token(&REALM_KEY, &claims);

    let err = manager()
        .get_oauth_user_info("platform-identity", &OAuthResponse::new(token))
        .unwrap_err();

    assert!(matches!(err, AuthenticationError::Unauthorized { .. }));
}

#[test]
fn authentication_is_idempotent() {
    let token = mint_token(&REALM_KEY, &alice_claims(json!(["pipeline-squad"])));
    let manager = manager();
    let response = OAuthResponse::new(token);

    let first = manager
        .get_oauth_user_info("platform-identity", &response)
        .expect("first call");
    let second = manager
        .get_oauth_user_info("platform-identity", &response)
        .expect("second call");

    assert_eq!(first, second);
}

#[test]
fn unknown_provider_yields_empty_result_even_with_valid_token() {
    let token = mint_token(&REALM_KEY, &alice_claims(json!(["pipeline-squad"])));

    let result = manager()
        .get_oauth_user_info("corporate-ldap", &OAuthResponse::new(token))
        .expect("unknown provider is not an error");

    assert_eq!(result, UserInfo::UnknownProvider);
}
