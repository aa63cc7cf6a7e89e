//! Session token codec and token extraction helpers

use std::sync::Arc;

use axum::http::HeaderValue;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::error::{AuthError, TokenError};

/// Signing algorithm for newly issued tokens
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms a presented token may declare. Anything outside the HMAC
/// family is rejected before the signature is checked.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Issues, verifies and refreshes session tokens.
///
/// Stateless apart from the configured secret; cheap to clone.
#[derive(Clone)]
pub struct TokenCodec {
    inner: Arc<CodecInner>,
}

struct CodecInner {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        // Expiry is checked by `verify`/`refresh` themselves: `refresh` must
        // read expired tokens, and `verify` requires `now < exp` strictly.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            inner: Arc::new(CodecInner {
                config,
                encoding_key,
                decoding_key,
                validation,
            }),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.inner.config
    }

    /// Issue a token for the given identity, valid for the configured TTL
    pub fn issue(&self, user_id: i64, email: &str, username: &str) -> Result<String, TokenError> {
        self.mint(user_id.to_string(), email.to_string(), username.to_string())
    }

    /// Verify signature, algorithm, issuer and expiry; return the claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = self.decode_signed(token)?;

        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Exchange a token close to (or shortly past) its expiry for a new one.
    ///
    /// Fails with `StillValid` while more than the refresh threshold remains,
    /// and with `Expired` once the token is older than the grace window.
    pub fn refresh(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.decode_signed(token)?;
        let config = &self.inner.config;

        let remaining = claims.exp.saturating_sub(Utc::now().timestamp());
        if remaining > config.refresh_threshold.num_seconds() {
            return Err(TokenError::StillValid);
        }
        if remaining < -config.refresh_grace.num_seconds() {
            return Err(TokenError::Expired);
        }

        tracing::debug!(sub = %claims.sub, remaining_secs = remaining, "Refreshing session token");

        self.mint(claims.sub, claims.email, claims.username)
    }

    fn mint(&self, sub: String, email: String, username: String) -> Result<String, TokenError> {
        let config = &self.inner.config;
        let iat = Utc::now().timestamp();

        let claims = SessionClaims {
            sub,
            email,
            username,
            iss: config.issuer.clone(),
            iat,
            exp: iat.saturating_add(config.token_ttl.num_seconds()),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(
            &Header::new(SIGNING_ALGORITHM),
            claims,
            &self.inner.encoding_key,
        )
        .map_err(TokenError::Encoding)
    }

    /// Decode a token whose signature, algorithm and issuer check out,
    /// regardless of expiry.
    fn decode_signed(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<SessionClaims>(
            token,
            &self.inner.decoding_key,
            &self.inner.validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            classify_failure(token, e.kind())
        })?;

        Ok(token_data.claims)
    }
}

/// Map a decode failure to a token error.
///
/// A header naming an algorithm jsonwebtoken cannot represent (`none`,
/// unknown names) fails as JSON; it is still a disallowed algorithm.
fn classify_failure(token: &str, kind: &ErrorKind) -> TokenError {
    match declared_algorithm(token) {
        Some(alg) if !is_accepted_algorithm(&alg) => TokenError::SignatureInvalid,
        _ => classify(kind),
    }
}

/// Raw `alg` value from the token header, if the header is readable JSON
fn declared_algorithm(token: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct RawHeader {
        alg: String,
    }

    let encoded = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes)
        .ok()
        .map(|header| header.alg)
}

fn is_accepted_algorithm(alg: &str) -> bool {
    alg.parse::<Algorithm>()
        .map(|alg| ACCEPTED_ALGORITHMS.contains(&alg))
        .unwrap_or(false)
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidIssuer => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The value must be exactly two space-separated parts, the first `Bearer`.
pub fn extract_bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let mut parts = header_str.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
