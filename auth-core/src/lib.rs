//! Authentication primitives for the gateway
//!
//! Provides the security building blocks the HTTP service composes:
//! - Password hashing (Argon2id)
//! - Signed bearer token encoding and validation (HS256)
//! - An authenticator handle bundling both for the request pipeline
//!
//! The service crate owns the credential store and the authorization policy;
//! this crate stays storage-free so token verification never needs I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth_core::{Claims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("alice", vec!["USER".to_string()], 24);
//! let token = codec.encode(&claims).unwrap();
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "alice");
//! ```
//!
//! ## Complete Login Flow
//! ```
//! use auth_core::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify the presented password, then issue a token
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let claims = Claims::for_subject("alice", vec!["USER".to_string()], 24);
//! let token = auth.issue_token(&claims).unwrap();
//!
//! // Per request: validate the presented token
//! let decoded = auth.validate_token(&token).unwrap();
//! assert_eq!(decoded.roles, vec!["USER".to_string()]);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
