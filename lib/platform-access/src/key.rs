//! Realm public key material for token verification.
//!
//! The realm server publishes its signing key in its base metadata
//! document as base64-encoded DER (`SubjectPublicKeyInfo`). The key is
//! fetched exactly once during process startup, before any request is
//! served, and the resulting [`VerificationKey`] is immutable: every
//! later verification reads it concurrently without synchronization. If
//! the provider rotates its key, verifications fail until the process
//! is restarted with a fresh fetch.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::DecodingKey;
use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use serde::Deserialize;

use crate::error::AuthenticationError;

/// Subset of the realm metadata document read at startup.
#[derive(Debug, Deserialize)]
struct RealmMetadata {
    /// Base64-encoded DER (`SubjectPublicKeyInfo`) public key.
    public_key: String,
}

/// The realm's public key, ready for signature verification.
#[derive(Clone)]
pub struct VerificationKey {
    decoding_key: DecodingKey,
}

impl VerificationKey {
    /// Parses a base64-encoded DER (`SubjectPublicKeyInfo`) RSA public
    /// key, as published by the realm server.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::KeyFetch`] if the value is not
    /// valid base64 or does not contain an RSA public key.
    pub fn from_der_base64(encoded: &str) -> Result<Self, AuthenticationError> {
        let der = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AuthenticationError::KeyFetch {
                reason: format!("public key is not valid base64: {e}"),
            })?;

        let public_key =
            RsaPublicKey::from_public_key_der(&der).map_err(|e| AuthenticationError::KeyFetch {
                reason: format!("public key is not DER-encoded RSA: {e}"),
            })?;

        let decoding_key = DecodingKey::from_rsa_raw_components(
            &public_key.n().to_bytes_be(),
            &public_key.e().to_bytes_be(),
        );

        Ok(Self { decoding_key })
    }

    /// Fetches the realm public key from the issuer's base URL.
    ///
    /// This is the one network call this crate makes, intended for
    /// process startup. Callers should treat failure as fatal: without
    /// the key no login can be verified.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::KeyFetch`] if the request fails,
    /// the server answers with an error status, or the body does not
    /// carry a usable `public_key`.
    pub async fn fetch(
        client: &reqwest::Client,
        issuer_url: &str,
    ) -> Result<Self, AuthenticationError> {
        let response = client
            .get(issuer_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AuthenticationError::KeyFetch {
                reason: e.to_string(),
            })?;

        let metadata: RealmMetadata =
            response
                .json()
                .await
                .map_err(|e| AuthenticationError::KeyFetch {
                    reason: format!("unexpected realm metadata body: {e}"),
                })?;

        tracing::info!(issuer = %issuer_url, "Fetched realm public key");

        Self::from_der_base64(&metadata.public_key)
    }

    /// Returns the decoding key for signature verification.
    #[must_use]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // DecodingKey exposes no inspectable state.
        f.debug_struct("VerificationKey").finish_non_exhaustive()
    }
}
