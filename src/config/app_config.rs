use serde::Deserialize;

/// Upper bound on `auth.expiration_hours` (ten years)
pub const MAX_TOKEN_HOURS: u64 = 24 * 365 * 10;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where team records live
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    #[serde(alias = "in_memory", alias = "inmemory")]
    Memory,
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Falls back to `DATABASE_URL` when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub expiration_hours: u64,
    /// Guard `/teams` with a bearer token
    pub require_token: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .field("jwt_secret", &"[hidden]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("expiration_hours", &self.expiration_hours)
            .field("require_token", &self.require_token)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl StorageConfig {
    /// Configured URL, else the `DATABASE_URL` environment variable
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "test".to_string(),
            password: "12345".to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_issuer: "Dux API".to_string(),
            expiration_hours: 24,
            require_token: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would only fail later, at request time
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let hours = self.auth.expiration_hours;
        if hours == 0 || hours > MAX_TOKEN_HOURS {
            return Err(config::ConfigError::Message(format!(
                "auth.expiration_hours must be between 1 and {}, got {}",
                MAX_TOKEN_HOURS, hours
            )));
        }

        if self.storage.min_connections > self.storage.max_connections {
            return Err(config::ConfigError::Message(format!(
                "storage.min_connections ({}) exceeds storage.max_connections ({})",
                self.storage.min_connections, self.storage.max_connections
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.auth.username, "test");
        assert_eq!(config.auth.password, "12345");
        assert_eq!(config.auth.jwt_issuer, "Dux API");
        assert!(config.auth.require_token);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9090

            [storage]
            backend = "postgresql"
            database_url = "postgres://db/teams"
            "#,
        );

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(
            config.storage.database_url(),
            Some("postgres://db/teams".to_string())
        );
        assert_eq!(config.storage.max_connections, 10);
        assert_eq!(config.storage.connect_timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_auth_section() {
        let config = from_toml(
            r#"
            [auth]
            username = "admin"
            require_token = false
            expiration_hours = 1
            "#,
        );

        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.auth.password, "12345");
        assert_eq!(config.auth.expiration_hours, 1);
        assert!(!config.auth.require_token);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", AuthConfig::default());

        assert!(!debug.contains("12345"));
        assert!(!debug.contains("change-me-in-production"));
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_expiration_is_rejected() {
        let config = from_toml(
            r#"
            [auth]
            expiration_hours = 10000000000
            "#,
        );

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auth.expiration_hours"));

        let mut config = AppConfig::default();
        config.auth.expiration_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let config = from_toml(
            r#"
            [storage]
            max_connections = 2
            min_connections = 5
            "#,
        );

        assert!(config.validate().is_err());
    }
}
