//! # Configuration
//!
//! Layered process configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml`, if present
//! 3. The file named by `SHIPPING_QUOTE_CONFIG`, if set
//! 4. Environment variables such as `SHIPPING_QUOTE__SERVER__PORT=9000`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.

use crate::application::services::{AggregationConfig, QuoteAggregationEngine};
use crate::domain::services::{BoxCostEvaluator, ServiceFeeSchedule, SurchargePolicy};
use crate::infrastructure::persistence::RateRepository;
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SHIPPING_QUOTE";

/// Environment variable naming an extra config file.
pub const CONFIG_FILE_ENV: &str = "SHIPPING_QUOTE_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database settings. Without a URL the in-memory repository is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: Option<String>,
    /// Pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Startup seeding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed file in the rate JSON layout.
    pub path: PathBuf,
    /// Seed an empty store at startup.
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/rates.json"),
            enabled: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "shipping_quote=info,tower_http=info".to_string(),
            json: false,
        }
    }
}

/// Pricing tunables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Per-box surcharge thresholds, fees and country rules.
    pub surcharges: SurchargePolicy,
    /// Per-origin service fees.
    pub service_fees: ServiceFeeSchedule,
}

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Database.
    pub database: DatabaseConfig,
    /// Startup seeding.
    pub seed: SeedConfig,
    /// Logging.
    pub logging: LoggingConfig,
    /// Quote aggregation.
    pub aggregation: AggregationConfig,
    /// Pricing.
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads configuration from `.env`, files and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();

        let mut files = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
        let mut required = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            let path = PathBuf::from(path);
            files.push(path.clone());
            required.push(path);
        }

        Self::from_sources(&files, &required, None)
    }

    /// Loads configuration from explicit sources.
    ///
    /// `files` are read in order and may be absent unless also listed in
    /// `required`. `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn from_sources(
        files: &[PathBuf],
        required: &[PathBuf],
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        for path in files {
            builder = builder.add_source(File::from(path.as_path()).required(required.contains(path)));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a single required file over the defaults, ignoring the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, malformed, or fails
    /// validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        Self::from_sources(
            std::slice::from_ref(&path),
            std::slice::from_ref(&path),
            Some(HashMap::new()),
        )
    }

    /// Builds a quote engine over `repository` with the configured pricing
    /// and channel policy.
    #[must_use]
    pub fn build_engine(&self, repository: Arc<dyn RateRepository>) -> QuoteAggregationEngine {
        QuoteAggregationEngine::new(
            repository,
            BoxCostEvaluator::new(self.pricing.surcharges.clone()),
            self.pricing.service_fees.clone(),
            self.aggregation.clone(),
        )
    }

    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid("database.max_connections must be positive"));
        }
        if self.aggregation.channels.is_empty() {
            return Err(ConfigError::invalid("aggregation.channels must not be empty"));
        }
        if self.aggregation.lookup_timeout_ms == 0 {
            return Err(ConfigError::invalid("aggregation.lookup_timeout_ms must be positive"));
        }
        if self.pricing.surcharges.volumetric_divisor <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "pricing.surcharges.volumetric_divisor must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ShippingChannel;
    use std::io::Write;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::from_sources(&[], &[], Some(HashMap::new())).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.seed.path, PathBuf::from("data/rates.json"));
        assert!(config.database.url.is_none());
        assert_eq!(config.pricing.service_fees.fee_for("China"), Decimal::from(300));
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = AppConfig::from_sources(
            &[PathBuf::from("does/not/exist")],
            &[],
            Some(HashMap::new()),
        )
        .unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn missing_required_file_fails() {
        let err = AppConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
            [server]
            port = 9100

            [aggregation]
            lookup_timeout_ms = 750
            channels = [{ channel = "ocean", mandatory = true }]

            [pricing.surcharges]
            overweight_unit_fee = 95
            "#,
        );

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.aggregation.lookup_timeout_ms, 750);
        assert_eq!(config.aggregation.channels.len(), 1);
        assert_eq!(config.aggregation.channels[0].channel, ShippingChannel::Ocean);
        assert_eq!(config.pricing.surcharges.overweight_unit_fee, Decimal::from(95));
        assert_eq!(config.pricing.surcharges.volumetric_divisor, Decimal::from(6000));
        assert_eq!(config.pricing.service_fees.fee_for("China"), Decimal::from(300));
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[server]\nport = 9100\n");
        let env = HashMap::from([
            ("SHIPPING_QUOTE__SERVER__PORT".to_string(), "9200".to_string()),
            (
                "SHIPPING_QUOTE__DATABASE__URL".to_string(),
                "postgres://localhost/rates".to_string(),
            ),
            ("SHIPPING_QUOTE__LOGGING__JSON".to_string(), "true".to_string()),
        ]);

        let path = file.path().to_path_buf();
        let config = AppConfig::from_sources(&[path], &[], Some(env)).unwrap();
        assert_eq!(config.server.port, 9200);
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/rates")
        );
        assert!(config.logging.json);
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let file = toml_file("[aggregation]\nlookup_timeout_ms = 0\n");
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("lookup_timeout_ms"));
    }

    #[test]
    fn build_engine_applies_pricing() {
        let file = toml_file("[pricing.surcharges]\noverweight_unit_fee = 95\n");
        let config = AppConfig::from_file(file.path()).unwrap();
        let repo = Arc::new(crate::infrastructure::persistence::in_memory::InMemoryRateRepository::new());

        let engine = config.build_engine(repo);
        assert_eq!(
            engine.evaluator().policy().overweight_unit_fee,
            Decimal::from(95)
        );
        assert_eq!(engine.config(), &config.aggregation);
    }

    #[test]
    fn zero_divisor_is_invalid() {
        let file = toml_file("[pricing.surcharges]\nvolumetric_divisor = 0\n");
        assert!(AppConfig::from_file(file.path()).is_err());
    }
}
