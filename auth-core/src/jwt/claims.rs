use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every issued token.
///
/// All fields are mandatory: a token without a subject, role list, or expiry
/// is not a usable identity assertion and must not be issued. Role names are
/// stored bare (`"ADMIN"`, not a prefixed authority string); the service maps
/// them to its typed role set after verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the authenticated username)
    pub sub: String,

    /// Granted role names, bare
    pub roles: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat + TTL`
    pub exp: i64,
}

impl Claims {
    /// Build a claim set for a freshly authenticated subject.
    ///
    /// `exp` is derived from the current time plus `ttl_hours`; the TTL is
    /// process-wide configuration, never negotiated per token.
    pub fn for_subject(subject: impl Into<String>, roles: Vec<String>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.into(),
            roles,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check the expiry claim against a caller-supplied clock reading.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
