use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime: one day.
pub const SESSION_TTL_SECS: i64 = 86_400;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // User ID
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> eyre::Result<Uuid> {
        Ok(Uuid::parse_str(&self.sub)?)
    }
}

/// Stateless HS256 session tokens.
///
/// No server-side record is kept: a token is valid until it expires.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionTokens {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("Session token signer initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id` valid for [`SESSION_TTL_SECS`].
    pub fn issue(&self, user_id: Uuid) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &SessionClaims) -> eyre::Result<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> eyre::Result<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    fn tokens() -> SessionTokens {
        SessionTokens::new(&JwtConfig::new(SECRET))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = tokens();
        let user_id = Uuid::now_v7();

        let token = tokens.issue(user_id).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = tokens();
        let now = Utc::now().timestamp();
        let token = tokens
            .sign(&SessionClaims {
                sub: Uuid::now_v7().to_string(),
                iat: now - 2 * SESSION_TTL_SECS,
                exp: now - SESSION_TTL_SECS,
            })
            .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let other = SessionTokens::new(&JwtConfig::new(
            "another-secret-that-is-at-least-32-characters",
        ));
        let token = other.issue(Uuid::now_v7()).unwrap();

        assert!(tokens().verify(&token).is_err());
        assert!(tokens().verify("not-a-jwt").is_err());
    }
}
