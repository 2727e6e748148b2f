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
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Access token codec.
///
/// Signs and verifies HS256 tokens carrying [`Claims`]. The secret is injected
/// at construction; handlers built from different secrets reject each other's
/// tokens.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Raw signing key bytes, used as-is
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating it invalidates every previously issued token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue an access token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue an access token as if it had been issued at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - User identifier stored in `sub`
    /// * `ttl` - Lifetime added to `issued_at` to form `exp`
    /// * `issued_at` - Issuance instant stored in `iat`
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        subject: Uuid,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, issued_at, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// The signature is checked before expiry, so a forged token is always
    /// `InvalidToken` regardless of its `exp`.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, wrong issuer, malformed token or claims
    /// * `Expired` - Signature valid but the current time is past `exp`
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;
        claims.subject()
    }

    /// Verify a token and return its full claim set.
    ///
    /// # Errors
    /// Same as [`JwtHandler::verify`]
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::InvalidToken(e.to_string()),
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
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);
        let subject = Uuid::new_v4();

        let token = handler
            .issue(subject, Duration::hours(1))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let verified = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, subject);
    }

    #[test]
    fn test_decode_claims() {
        let handler = JwtHandler::new(SECRET);
        let subject = Uuid::new_v4();
        let issued_at = Utc::now();

        let token = handler
            .issue_at(subject, Duration::minutes(5), issued_at)
            .expect("Failed to issue token");
        let claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(claims.iss, "chirpy");
        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.iat, issued_at.timestamp_micros() as f64 / 1_000_000.0);
        assert_eq!(claims.exp, issued_at.timestamp() + 300);
    }

    #[test]
    fn test_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(2);

        let token = handler
            .issue_at(Uuid::new_v4(), Duration::hours(1), issued_at)
            .expect("Failed to issue token");

        assert_eq!(handler.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue(Uuid::new_v4(), Duration::hours(1))
            .expect("Failed to issue token");

        let result = handler2.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_secret_wins_over_expiry() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue_at(
                Uuid::new_v4(),
                Duration::hours(1),
                Utc::now() - Duration::hours(2),
            )
            .expect("Failed to issue token");

        assert!(matches!(
            handler2.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_spliced_signature_rejected() {
        let handler = JwtHandler::new(SECRET);

        let token1 = handler
            .issue(Uuid::new_v4(), Duration::hours(1))
            .expect("Failed to issue token");
        let token2 = handler
            .issue(Uuid::new_v4(), Duration::hours(1))
            .expect("Failed to issue token");

        let (signed_part, _) = token1.rsplit_once('.').unwrap();
        let (_, foreign_signature) = token2.rsplit_once('.').unwrap();
        let forged = format!("{}.{}", signed_part, foreign_signature);

        assert!(matches!(
            handler.verify(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_garbage() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.verify("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_different_instants_different_tokens() {
        let handler = JwtHandler::new(SECRET);
        let subject = Uuid::new_v4();
        let now = Utc::now();

        let first = handler
            .issue_at(subject, Duration::hours(1), now)
            .expect("Failed to issue token");
        let second = handler
            .issue_at(subject, Duration::hours(1), now + Duration::seconds(1))
            .expect("Failed to issue token");

        assert_ne!(first, second);
        assert_eq!(handler.verify(&first), Ok(subject));
        assert_eq!(handler.verify(&second), Ok(subject));
    }

    #[test]
    fn test_same_second_different_tokens() {
        let handler = JwtHandler::new(SECRET);
        let subject = Uuid::new_v4();
        let now = Utc::now();

        let first = handler
            .issue_at(subject, Duration::hours(1), now)
            .expect("Failed to issue token");
        let second = handler
            .issue_at(subject, Duration::hours(1), now + Duration::milliseconds(1))
            .expect("Failed to issue token");

        assert_ne!(first, second);
        assert_eq!(handler.verify(&first), Ok(subject));
        assert_eq!(handler.verify(&second), Ok(subject));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: "someone-else".to_string(),
            sub: Uuid::new_v4().to_string(),
            iat: now as f64,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_missing_claim_rejected() {
        #[derive(serde::Serialize)]
        struct Partial {
            iss: String,
            sub: String,
            exp: i64,
        }

        let handler = JwtHandler::new(SECRET);
        let partial = Partial {
            iss: ISSUER.to_string(),
            sub: Uuid::new_v4().to_string(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &partial,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
