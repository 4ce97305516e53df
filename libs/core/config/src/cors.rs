use crate::{env_first, ConfigError, FromEnv};

/// Browser origins allowed to call the API with credentials.
///
/// Loaded from `CORS_ALLOWED_ORIGIN` (comma separated), falling back to
/// `FRONTEND_URL` for single-frontend deployments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_first(&["CORS_ALLOWED_ORIGIN", "FRONTEND_URL"]).ok_or_else(|| {
            ConfigError::MissingEnvVar("CORS_ALLOWED_ORIGIN or FRONTEND_URL".to_string())
        })?;

        let allowed_origins = Self::parse(&raw);
        if allowed_origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}
