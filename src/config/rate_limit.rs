//! Login throttling configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Login attempts allowed per username in one window
    #[serde(default = "default_login_attempts")]
    pub login_attempts_per_window: u32,

    /// Fixed window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login_attempts_per_window == 0 || self.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_attempts_per_window: default_login_attempts(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_login_attempts() -> u32 {
    5
}

fn default_window_secs() -> u32 {
    60
}
