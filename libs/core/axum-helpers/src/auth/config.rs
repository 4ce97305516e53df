//! Session signing configuration.

use core_config::{ConfigError, FromEnv, env_required};

/// Shortest accepted HS256 secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Secret used to sign `auth_token` session tokens.
///
/// Environment variables:
/// - `JWT_SECRET` (required, at least [`MIN_SECRET_LEN`] characters)
///
/// ```ignore
/// let tokens = SessionTokens::new(&JwtConfig::from_env()?);
/// ```
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("secret", &"****").finish()
    }
}

impl JwtConfig {
    /// Fixed secret, for tests and tools.
    ///
    /// # Panics
    /// Panics if the secret is shorter than [`MIN_SECRET_LEN`].
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if let Err(e) = check_secret(&secret) {
            panic!("{e}");
        }
        Self { secret }
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {})",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;
        Ok(Self { secret })
    }
}
