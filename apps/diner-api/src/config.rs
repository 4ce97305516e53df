use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};
use database::mongodb::MongoConfig;
use media::CloudinaryConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config types.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
    pub jwt: JwtConfig,
    pub cloudinary: CloudinaryConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cloudinary: CloudinaryConfig::from_env()?,
        })
    }

    /// Session cookies are `Secure` outside development.
    pub fn secure_cookies(&self) -> bool {
        self.environment.use_https()
    }
}
