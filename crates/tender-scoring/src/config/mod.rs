use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::assessment::{EliminationFilter, ExclusionPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Elimination rules and audit identity used when scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub elimination_dimensions: Vec<String>,
    pub exclusion_policy: ExclusionPolicy,
    /// Principal recorded on results when a request does not name one.
    pub principal: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            elimination_dimensions: vec!["Location".to_string()],
            exclusion_policy: ExclusionPolicy::default(),
            principal: "system".to_string(),
        }
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let elimination_dimensions = match env::var("SCORING_ELIMINATION_DIMENSIONS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => defaults.elimination_dimensions,
        };

        let exclusion_policy = match env::var("SCORING_EXCLUSION_POLICY") {
            Ok(raw) => ExclusionPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidExclusionPolicy(raw))?,
            Err(_) => defaults.exclusion_policy,
        };

        let principal = env::var("SCORING_PRINCIPAL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.principal);

        Ok(Self {
            elimination_dimensions,
            exclusion_policy,
            principal,
        })
    }

    pub fn elimination_filter(&self) -> EliminationFilter {
        EliminationFilter::new(
            self.elimination_dimensions.iter().cloned(),
            self.exclusion_policy,
        )
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidExclusionPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidExclusionPolicy(value) => write!(
                f,
                "SCORING_EXCLUSION_POLICY '{value}' must be one of noop, all-non-zero, at-least-one"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidExclusionPolicy(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
