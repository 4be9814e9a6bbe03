use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Role;
use super::errors::TokenError;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Session token encoder and verifier.
///
/// Tokens are HS256 JWTs signed with a process-wide secret. Verification is
/// stateless: a token stays valid until `exp`, there is no revocation list.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec for the given secret and token lifetime.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Create a codec with the standard 24 hour lifetime.
    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(ACCESS_TOKEN_TTL_HOURS))
    }

    /// Issue a token for an identity, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, sub: &str, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(sub, email, role, Utc::now())
    }

    /// Issue a token whose validity window starts at `issued_at`.
    pub fn issue_at(
        &self,
        sub: &str,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(sub, email, role, issued_at, self.ttl);
        self.encode(&claims)
    }

    /// Sign an arbitrary claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a JWT, wrong algorithm, bad signature, or altered content
    /// * `Expired` - Signature is valid but `exp` is in the past
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
