use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Connection settings for the PostgreSQL store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// A full connection URL. When set it wins over the discrete fields below.
    pub url: Option<Secret>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret,
    pub name: String,
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection.
    pub acquire_timeout_secs: u64,
    /// Server-side `statement_timeout` applied to every connection.
    pub statement_timeout_ms: u64,
}

/// Logging verbosity and an optional directory for daily-rolling log files.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,sqlx=warn`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub directory: Option<PathBuf>,
}

/// A string that never shows up in `Debug` output or logs.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Command-line overrides for the server section.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerArgs {
    /// Address to bind, e.g. 127.0.0.1.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,
    /// Port to listen on.
    #[cfg_attr(feature = "clap", arg(long, short))]
    pub port: Option<u16>,
}

/// Flat environment variables honoured on top of `DASHBOARD__*`, mapped to
/// their settings keys.
const FLAT_ENV_OVERRIDES: [(&str, &str); 7] = [
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

impl Settings {
    /// Builds settings from defaults, an optional TOML file and an explicit
    /// environment map, then validates them.
    pub fn build(file: Option<&Path>, env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432_i64)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "cm3010_stock")?
            .set_default("database.max_connections", 10_i64)?
            .set_default("database.acquire_timeout_secs", 5_i64)?
            .set_default("database.statement_timeout_ms", 10_000_i64)?
            .set_default("logging.level", "info")?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let prefixed: config::Map<String, String> = env
            .iter()
            .filter(|(key, _)| key.starts_with("DASHBOARD__"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        builder = builder.add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(prefixed)),
        );

        for (var, key) in FLAT_ENV_OVERRIDES {
            let value = env.get(var).filter(|value| !value.is_empty()).cloned();
            builder = builder.set_override_option(key, value)?;
        }

        let settings = builder.build()?.try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Applies command-line overrides on top of the loaded settings.
    pub fn apply_server_args(&mut self, args: &ServerArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be non-zero".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.statement_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "database.statement_timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let settings = Settings::build(None, &HashMap::new()).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.name, "cm3010_stock");
        assert_eq!(settings.database.url, None);
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn flat_variables_are_honoured() {
        let settings = Settings::build(
            None,
            &env(&[
                ("PORT", "8080"),
                ("DB_HOST", "db.internal"),
                ("DB_USER", "reader"),
                ("DB_PASSWORD", "hunter2"),
                ("DB_NAME", "prices"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.user, "reader");
        assert_eq!(settings.database.password.expose(), "hunter2");
        assert_eq!(settings.database.name, "prices");
    }

    #[test]
    fn flat_variables_beat_prefixed_ones() {
        let settings = Settings::build(
            None,
            &env(&[
                ("DASHBOARD__SERVER__PORT", "9000"),
                ("DASHBOARD__DATABASE__STATEMENT_TIMEOUT_MS", "2500"),
                ("PORT", "8081"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.database.statement_timeout_ms, 2500);
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let settings = Settings::build(None, &env(&[("HOME", "/root"), ("PORT", "")])).unwrap();
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn database_url_is_kept_secret() {
        let settings = Settings::build(
            None,
            &env(&[("DATABASE_URL", "postgres://u:p@localhost/stock")]),
        )
        .unwrap();
        let url = settings.database.url.as_ref().map(Secret::expose);
        assert_eq!(url, Some("postgres://u:p@localhost/stock"));
        assert!(!format!("{:?}", settings.database).contains("u:p@"));
    }

    #[test]
    fn zero_port_is_rejected() {
        let result = Settings::build(None, &env(&[("PORT", "0")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn server_args_override_settings() {
        let mut settings = Settings::build(None, &HashMap::new()).unwrap();
        settings.apply_server_args(&ServerArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(4000),
        });
        let addr = settings.server.socket_addr().unwrap();
        assert_eq!(addr, "127.0.0.1:4000".parse().unwrap());
    }

    #[test]
    fn hostname_is_not_a_socket_address() {
        let mut settings = Settings::build(None, &HashMap::new()).unwrap();
        settings.server.host = "localhost".to_string();
        assert!(settings.server.socket_addr().is_err());
    }
}
