//! Authentication utilities for the storefront backend
//!
//! - Credential hashing (Argon2id, self-salted PHC strings)
//! - Session token issuance and verification (HS256 JWT, 24 hour lifetime)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Role, TokenCodec};
//!
//! let codec = TokenCodec::with_default_ttl(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("user123", "a@b.com", Role::Customer).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.email, "a@b.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("password123", &hash, "user123", "a@b.com", Role::Customer)
//!     .unwrap();
//!
//! // Protected request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Role;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::ACCESS_TOKEN_TTL_HOURS;
