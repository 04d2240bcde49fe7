use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::procurement::analysis::{ScoreWeights, WeightError};

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

/// Top-level configuration for the application.
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
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            scoring: ScoringConfig::load_from_env()?,
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
    pub ansi: bool,
}

const WEIGHT_VARS: [&str; 6] = [
    "APP_WEIGHT_FINANCIAL",
    "APP_WEIGHT_TECHNICAL",
    "APP_WEIGHT_DOCUMENTARY",
    "APP_WEIGHT_TIMELINE",
    "APP_WEIGHT_RISK",
    "APP_WEIGHT_COMPETITION",
];

/// Scoring dials for the analysis engine. A weight vector that does not sum
/// to 1.0 is rejected here, before any scoring runs.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
}

impl ScoringConfig {
    fn load_from_env() -> Result<Self, ConfigError> {
        let raw: Vec<Option<String>> = WEIGHT_VARS
            .iter()
            .map(|name| env::var(name).ok())
            .collect();

        if raw.iter().all(Option::is_none) {
            return Ok(Self {
                weights: ScoreWeights::default(),
            });
        }

        let mut parsed = [0.0f64; 6];
        for (slot, (name, value)) in parsed.iter_mut().zip(WEIGHT_VARS.iter().zip(&raw)) {
            let value = value
                .as_deref()
                .ok_or(ConfigError::IncompleteWeights)?;
            *slot = value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidWeight {
                    name: (*name).to_string(),
                })?;
        }

        let [financial, technical, documentary, timeline, risk, competition] = parsed;
        let weights =
            ScoreWeights::new(financial, technical, documentary, timeline, risk, competition)
                .map_err(ConfigError::InvalidWeights)?;

        Ok(Self { weights })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    IncompleteWeights,
    InvalidWeight { name: String },
    InvalidWeights(WeightError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::IncompleteWeights => {
                write!(
                    f,
                    "APP_WEIGHT_* overrides must either all be set or all be absent"
                )
            }
            ConfigError::InvalidWeight { name } => {
                write!(f, "{name} must parse to a floating point weight")
            }
            ConfigError::InvalidWeights(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::IncompleteWeights
            | ConfigError::InvalidWeight { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights(source) => Some(source),
        }
    }
}
