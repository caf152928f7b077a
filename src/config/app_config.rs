use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub session: SessionConfig,
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

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Key store backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Session marker settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the marker for the command line client
    pub marker_path: String,
    /// Cookie holding the marker for browser clients
    pub cookie_name: String,
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

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            marker_path: ".api-key-dashboard/validApiKey".to_string(),
            cookie_name: crate::domain::MARKER_NAME.to_string(),
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

        let mut app_config: Self = config.try_deserialize()?;

        // DATABASE_URL is honoured when no explicit setting exists
        if app_config.storage.database_url.is_none() {
            app_config.storage.database_url = std::env::var("DATABASE_URL").ok();
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.session.cookie_name, "validApiKey");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "127.0.0.1", "port": 3000 }, "storage": { "backend": "postgres" } }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, "postgres");
        assert_eq!(config.storage.max_connections, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_single_field_overrides_keep_section_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "port": 9090 }, "logging": { "format": "json" } }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.logging.format, LogFormat::Json));
    }
}
