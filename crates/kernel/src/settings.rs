use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKSHELF_ENV";
const CONFIG_DIR_ENV: &str = "BOOKSHELF_CONFIG_DIR";
const ENV_PREFIX: &str = "BOOKSHELF";
const DB_ENV_PREFIX: &str = "DB";

/// Environment variables keyed by name, used in place of the process
/// environment when loading settings.
pub type EnvVars = config::Map<String, String>;

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(name: &str) -> anyhow::Result<Self> {
        match name {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration assembled from layered sources.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub pool: PoolSettings,
    pub telemetry: TelemetrySettings,
    pub database: DatabaseSettings,
}

/// Sections that may come from config files or `BOOKSHELF__*` variables.
#[derive(Debug, Deserialize, Default)]
struct LayeredSettings {
    #[serde(default)]
    server: ServerSettings,
    #[serde(default)]
    pool: PoolSettings,
    #[serde(default)]
    telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// and the `DB_*` connection variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        Self::from_sources(None)
    }

    /// Build settings from an explicit variable map, or from the process
    /// environment when `vars` is `None`.
    pub fn from_sources(vars: Option<EnvVars>) -> anyhow::Result<Self> {
        let lookup = |key: &str| match &vars {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        let environment_name = lookup(ENV_VAR_NAME).unwrap_or_else(|| DEFAULT_ENV.to_string());
        let environment = Environment::parse(&environment_name)?;

        let config_dir = match lookup(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment_name));

        let layered: LayeredSettings = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(vars.clone()),
            )
            .build()
            .with_context(|| "failed to build configuration")?
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        let database: DatabaseSettings = config::Config::builder()
            .add_source(config::Environment::with_prefix(DB_ENV_PREFIX).source(vars))
            .build()
            .with_context(|| "failed to read DB_* variables")?
            .try_deserialize()
            .with_context(|| {
                "DB_HOST, DB_PORT, DB_USER, DB_PASS, DB_NAME and DB_SSLMODE must all be set"
            })?;

        Ok(Self {
            environment,
            server: layered.server,
            pool: layered.pool,
            telemetry: layered.telemetry,
            database,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

/// Connection parameters read from `DB_HOST`, `DB_PORT`, `DB_USER`,
/// `DB_PASS`, `DB_NAME` and `DB_SSLMODE`. Values are taken verbatim.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    #[serde(rename = "pass")]
    pub password: String,
    #[serde(rename = "name")]
    pub dbname: String,
    pub sslmode: String,
}

impl DatabaseSettings {
    /// libpq-style DSN with the password masked, for logs.
    pub fn dsn_redacted(&self) -> String {
        format!(
            "host={} port={} user={} password=*** dbname={} sslmode={}",
            self.host, self.port, self.user, self.dbname, self.sslmode
        )
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSettings {
    #[serde(default = "PoolSettings::default_max_connections")]
    pub max_connections: u32,
}

impl PoolSettings {
    fn default_max_connections() -> u32 {
        5
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: Self::default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Variables for a complete connection plus a config dir that has no files.
    pub(crate) fn test_vars() -> EnvVars {
        let mut vars = EnvVars::new();
        for (key, value) in [
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DB_USER", "postgres"),
            ("DB_PASS", "secret"),
            ("DB_NAME", "books"),
            ("DB_SSLMODE", "disable"),
            ("BOOKSHELF_CONFIG_DIR", "/nonexistent/bookshelf-config"),
        ] {
            vars.insert(key.to_string(), value.to_string());
        }
        vars
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::from_sources(Some(test_vars())).unwrap();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn db_variables_map_onto_database_settings() {
        let settings = Settings::from_sources(Some(test_vars())).unwrap();
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.database.port, "5432");
        assert_eq!(settings.database.user, "postgres");
        assert_eq!(settings.database.password, "secret");
        assert_eq!(settings.database.dbname, "books");
        assert_eq!(settings.database.sslmode, "disable");
    }

    #[test]
    fn missing_db_variable_is_an_error() {
        let mut vars = test_vars();
        vars.remove("DB_PASS");
        assert!(Settings::from_sources(Some(vars)).is_err());
    }

    #[test]
    fn server_defaults_to_port_8080() {
        let settings = Settings::from_sources(Some(test_vars())).unwrap();
        assert_eq!(settings.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.pool.max_connections, 5);
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn prefixed_variables_override_server_section() {
        let mut vars = test_vars();
        vars.insert("BOOKSHELF__SERVER__PORT".to_string(), "9090".to_string());
        vars.insert("BOOKSHELF__TELEMETRY__LOG_FORMAT".to_string(), "json".to_string());
        let settings = Settings::from_sources(Some(vars)).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let mut vars = test_vars();
        vars.insert("BOOKSHELF_ENV".to_string(), "qa".to_string());
        let err = Settings::from_sources(Some(vars)).unwrap_err();
        assert!(err.to_string().contains("unsupported environment"));
    }

    #[test]
    fn debug_output_masks_password() {
        let settings = Settings::from_sources(Some(test_vars())).unwrap();
        let rendered = format!("{:?}", settings.database);
        assert!(!rendered.contains("secret"));
        assert_eq!(
            settings.database.dsn_redacted(),
            "host=localhost port=5432 user=postgres password=*** dbname=books sslmode=disable"
        );
    }
}
