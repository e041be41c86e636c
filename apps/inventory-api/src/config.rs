//! Configuration for Inventory API

use domain_inventory::{ServiceConfig, DEFAULT_REPLENISH_QUANTITY};
use std::env;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

/// HTTP listener configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = parse_env("PORT", "8080")?;

        Ok(Self { host, port })
    }
}

impl FromEnv for ServiceConfig {
    /// - REPLENISH_QUANTITY: units added when a product is marked in stock (default 10)
    fn from_env() -> Result<Self, ConfigError> {
        let replenish_quantity: u32 =
            parse_env("REPLENISH_QUANTITY", &DEFAULT_REPLENISH_QUANTITY.to_string())?;

        if replenish_quantity == 0 {
            return Err(ConfigError::ParseError {
                key: "REPLENISH_QUANTITY".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(ServiceConfig { replenish_quantity })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub inventory: ServiceConfig,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let inventory = ServiceConfig::from_env()?;

        let cors_allowed_origins = env_or_default("CORS_ALLOWED_ORIGIN", DEFAULT_CORS_ORIGIN)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let seed_demo_data = parse_env("SEED_DEMO_DATA", "false")?;

        Ok(Self {
            environment,
            server,
            inventory,
            cors_allowed_origins,
            seed_demo_data,
        })
    }
}
