//! Client configuration.
//!
//! Layered with the `config` crate, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `GUESTHOUSE_*` environment variables (e.g. `GUESTHOUSE_API_URL`)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

/// Prefix of the environment variables read by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "GUESTHOUSE";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is unusable.
    #[error("invalid configuration value for {key}: {message}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Runtime settings of the booking client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the booking API, e.g. `http://localhost:8080/api`.
    pub api_url: String,
    /// File backing the durable session storage.
    pub storage_path: PathBuf,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: default_storage_path(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Loads defaults, then `file` if given and present, then the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is unusable.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default(
                "storage_path",
                defaults.storage_path.to_string_lossy().into_owned(),
            )?
            .set_default("timeout_ms", defaults.timeout_ms)?
            .set_default("user_agent", defaults.user_agent)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api_url).map_err(|e| ConfigError::Invalid {
            key: "api_url",
            message: e.to_string(),
        })?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// `<platform config dir>/guesthouse/session.json`, or the working
/// directory when the platform has none.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("guesthouse")
        .join("session.json")
}

/// `<platform config dir>/guesthouse/config.toml`, if the platform has one.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("guesthouse").join("config.toml"))
}

fn default_user_agent() -> String {
    format!("GuestHouseClient/{}", env!("CARGO_PKG_VERSION"))
}
