use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Encodes and verifies the signed bearer token (JWS, HS256).
///
/// Holds both key halves derived from one symmetric secret established at
/// startup. The codec is read-only after construction, so a single instance
/// can be shared across request handlers without locking.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from the process-wide symmetric secret.
    ///
    /// The secret is treated as opaque bytes and is not retained beyond the
    /// derived keys. It should be at least 256 bits for HS256 and must never
    /// be logged.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Serialize and sign a claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Parse a token, verify its signature, and check expiry.
    ///
    /// Succeeds only if the structure parses, the recomputed signature
    /// matches, and `exp` has not elapsed. `exp` is a required claim here;
    /// a token without one is rejected as malformed.
    ///
    /// # Errors
    /// * `Expired` - `exp` is in the past
    /// * `InvalidSignature` - signature does not match the payload
    /// * `Malformed` - structure or claims failed to parse
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode_round_trip() {
        let codec = TokenCodec::new(SECRET);
        let claims = Claims::for_subject("alice", vec!["USER".to_string()], 24);

        let token = codec.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        let codec = TokenCodec::new(SECRET);

        // Issued two days ago, expired a day ago; well past validation leeway.
        let mut claims = Claims::for_subject("alice", vec!["USER".to_string()], 24);
        claims.iat -= 2 * 24 * 60 * 60;
        claims.exp -= 2 * 24 * 60 * 60;

        let token = codec.encode(&claims).expect("Failed to encode token");
        let result = codec.decode(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new(b"a_different_secret_of_32_bytes_min!!");

        let claims = Claims::for_subject("alice", vec!["ADMIN".to_string()], 24);
        let token = codec.encode(&claims).expect("Failed to encode token");

        let result = other.decode(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let codec = TokenCodec::new(SECRET);
        let claims = Claims::for_subject("alice", vec!["USER".to_string()], 24);
        let token = codec.encode(&claims).expect("Failed to encode token");

        // Swap the payload segment for one claiming ADMIN; signature no longer matches.
        let admin = Claims::for_subject("alice", vec!["ADMIN".to_string()], 24);
        let forged_payload = codec
            .encode(&admin)
            .unwrap()
            .split('.')
            .nth(1)
            .unwrap()
            .to_string();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_payload;
        let forged = parts.join(".");

        assert!(codec.decode(&forged).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = TokenCodec::new(SECRET);

        assert!(matches!(
            codec.decode("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(codec.decode("").is_err());
    }
}
