//! Authentication utilities library
//!
//! Provides the stateless token authentication building blocks:
//! - Password hashing (Argon2id)
//! - Access token issuance and verification (HS256 JWT with `sub`, `iat`, `exp`)
//! - Authentication coordination
//!
//! Credential lookup is not part of this crate. Each service owns its
//! credential store and hands the stored hash to [`Authenticator`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let (token, _) = handler.issue("farhan").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "farhan");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//!
//! // Provisioning: hash password
//! let hash = auth.hash_password("123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("farhan", "123", &hash).unwrap();
//!
//! // Subsequent request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "farhan");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
