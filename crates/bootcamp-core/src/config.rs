//! Configuration module
//!
//! Settings are read from the environment (optionally seeded from a `.env`
//! file) by [`Config::from_env`] and checked by [`Config::validate`].

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_PICTURE_SIZE_MB: usize = 10;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Root directory for user-uploaded media
    pub media_root: PathBuf,
    /// Public URL prefix under which `media_root` is served
    pub media_url: String,
    /// Avatar shown for users who never cropped a picture
    pub default_avatar_url: String,
    /// PostgreSQL URL; when unset the in-memory store is used
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub max_picture_size_bytes: usize,
    /// Account created at startup when missing (`SEED_USERNAME` / `SEED_PASSWORD`)
    pub seed_account: Option<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let media_url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string());
        let default_avatar_url = env::var("DEFAULT_AVATAR_URL")
            .unwrap_or_else(|_| "/static/img/user.png".to_string());

        let max_picture_size_mb = env::var("MAX_PICTURE_SIZE_MB")
            .unwrap_or_else(|_| MAX_PICTURE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_PICTURE_SIZE_MB);

        let seed_account = match (env::var("SEED_USERNAME"), env::var("SEED_PASSWORD")) {
            (Ok(user), Ok(password)) if !user.trim().is_empty() && !password.is_empty() => {
                Some((user.trim().to_string(), password))
            }
            _ => None,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            media_root: PathBuf::from(
                env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".to_string()),
            ),
            media_url,
            default_avatar_url,
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid number"))?,
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_TIMEOUT_SECONDS must be a valid number"))?,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRY_HOURS must be a valid number"))?,
            max_picture_size_bytes: picture_size_bytes(max_picture_size_mb)?,
            seed_account,
        };

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
        }

        Ok(())
    }

    /// Public URL of a storage key under the media root.
    pub fn media_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.media_url.trim_end_matches('/'), key)
    }
}

fn picture_size_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_PICTURE_SIZE_MB is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            server_port: 4000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            media_root: PathBuf::from("./media"),
            media_url: "/media/".to_string(),
            default_avatar_url: "/static/img/user.png".to_string(),
            database_url: None,
            db_max_connections: 5,
            db_timeout_seconds: 5,
            jwt_secret: "x".repeat(32),
            jwt_expiry_hours: 24,
            max_picture_size_bytes: 1024,
            seed_account: None,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = sample();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wildcard_cors_in_production() {
        let mut config = sample();
        config.environment = "Production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://bootcamp.example".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_postgres_url() {
        let mut config = sample();
        config.database_url = Some("mysql://localhost/db".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_picture_size_bytes_rejects_overflow() {
        assert_eq!(picture_size_bytes(10).unwrap(), 10 * 1024 * 1024);
        assert!(picture_size_bytes(usize::MAX / 1024).is_err());
    }

    #[test]
    fn test_media_url_for_joins_single_slash() {
        let config = sample();
        assert_eq!(
            config.media_url_for("profile_pictures/alice.jpg"),
            "/media/profile_pictures/alice.jpg"
        );
    }
}
