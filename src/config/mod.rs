//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `VIP_MEMBERSHIP`
//! prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use vip_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod membership;
mod rate_limit;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use membership::MembershipConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "VIP_MEMBERSHIP";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Session tokens and password hashing
    pub auth: AuthConfig,

    /// Super-admin and VIP duration
    #[serde(default)]
    pub membership: MembershipConfig,

    /// Login throttling
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then `VIP_MEMBERSHIP__<SECTION>__<KEY>`
    /// variables, e.g. `VIP_MEMBERSHIP__AUTH__JWT_SECRET`.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` if a required key is missing or a value
    /// does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is normal outside development
        let _ = dotenvy::dotenv();

        let source = config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__");

        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Stops at the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.membership.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
