//! # Configuration
//!
//! Runtime settings for the matching service.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `venture-match.toml` in the working directory (optional)
//! 3. `VENTURE_MATCH__*` environment variables, with `__` separating
//!    nested keys (e.g. `VENTURE_MATCH__SERVER__PORT=8080`,
//!    `VENTURE_MATCH__MATCHING__WEIGHTS__SECTOR=0.4`)
//!
//! A `.env` file is read first when present, so its entries behave like
//! real environment variables.
//!
//! | Section | Type |
//! |---------|------|
//! | `server` | [`ServerConfig`] |
//! | `matching` | [`MatchingPolicy`] |
//! | `compliance` | [`LimitPolicy`] |
//! | `logging` | [`LogConfig`] |

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::recommendation::RecommendationFilter;
use crate::domain::services::{LimitPolicy, MatchWeights};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VENTURE_MATCH";

/// Default config file stem.
pub const CONFIG_FILE: &str = "venture-match";

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
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Parses `host:port`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the host is not an IP
    /// address.
    pub fn socket_addr(&self) -> ApplicationResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ApplicationError::configuration(format!("server address: {e}")))
    }
}

/// Thresholds, page sizes and weights for matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingPolicy {
    /// Criterion weights.
    pub weights: MatchWeights,
    /// Investor view: startups recommended to an investor.
    pub startup_recommendations: RecommendationFilter,
    /// Founder view: investors matched to a startup.
    pub investor_matches: RecommendationFilter,
    /// Memoise scores between requests.
    pub cache_scores: bool,
}

impl Default for MatchingPolicy {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            startup_recommendations: RecommendationFilter::new(50, 20),
            investor_matches: RecommendationFilter::new(40, 50),
            cache_scores: true,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Matching policy.
    pub matching: MatchingPolicy,
    /// Investor-limit tiers.
    pub compliance: LimitPolicy,
    /// Logging.
    pub logging: LogConfig,
}

impl AppConfig {
    /// Loads `.env`, the optional config file and environment overrides,
    /// then validates the result.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if `.env` exists but is
    /// malformed, a source cannot be read, or the merged values are invalid.
    pub fn load() -> ApplicationResult<Self> {
        check_dotenv(dotenvy::dotenv().map(|_| ()))?;
        Self::load_from(CONFIG_FILE)
    }

    /// Loads from a specific file stem plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be read
    /// or the merged values are invalid.
    pub fn load_from(file_stem: &str) -> ApplicationResult<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(file_stem).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApplicationError::configuration(format!("building config: {e}")))?;

        let app: Self = cfg
            .try_deserialize()
            .map_err(|e| ApplicationError::configuration(format!("deserializing config: {e}")))?;
        app.validate()?;
        Ok(app)
    }

    /// Checks weights, thresholds and tier boundaries.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` describing the first
    /// invalid value.
    pub fn validate(&self) -> ApplicationResult<()> {
        let to_config = |e: crate::domain::errors::DomainError| {
            ApplicationError::configuration(e.to_string())
        };
        self.matching.weights.validate().map_err(to_config)?;
        self.matching
            .startup_recommendations
            .validate("matching.startup_recommendations")
            .map_err(to_config)?;
        self.matching
            .investor_matches
            .validate("matching.investor_matches")
            .map_err(to_config)?;
        self.compliance.validate().map_err(to_config)?;
        if self.logging.level.trim().is_empty() {
            return Err(ApplicationError::configuration(
                "logging.level must not be empty",
            ));
        }
        Ok(())
    }
}

// A missing .env is normal outside development; anything else is fatal.
fn check_dotenv(result: Result<(), dotenvy::Error>) -> ApplicationResult<()> {
    match result {
        Err(e) if !e.not_found() => {
            Err(ApplicationError::configuration(format!("reading .env: {e}")))
        }
        _ => Ok(()),
    }
}
