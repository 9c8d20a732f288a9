use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// The one security object the HTTP layer holds.
///
/// Bundles password hashing with the token codec behind a single handle:
/// registration hashes through it, login issues through it, and the identity
/// interceptor validates through it. Credential lookup stays with the caller
/// so this type never touches storage and token validation stays I/O-free.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create an authenticator bound to the process-wide token secret.
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, hash)
    }

    /// Sign a claim set into a bearer token.
    ///
    /// # Errors
    /// * `TokenError` - serialization or signing failed
    pub fn issue_token(&self, claims: &Claims) -> Result<String, TokenError> {
        self.token_codec.encode(claims)
    }

    /// Validate a presented token and return its claims.
    ///
    /// Purely local: signature and expiry only, no store lookup.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.decode(token)
    }
}
