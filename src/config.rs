use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(1_000);
pub const MAX_ALLOWED_RETRIES: u32 = 10;

/// Script loader settings shared by every load issued through one loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Backoff before retry `n` is `base_delay * 2^n`
    pub base_delay: Duration,
    /// Hosts allowed to serve scripts over plain HTTP
    pub dev_hosts: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SCRIPT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
            dev_hosts: vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                "::1".to_string(),
            ],
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timeout = match env::var("AFRICA_PAY_SCRIPT_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .context("AFRICA_PAY_SCRIPT_TIMEOUT_MS must be a valid number")?,
            ),
            Err(_) => defaults.timeout,
        };

        let max_retries = match env::var("AFRICA_PAY_SCRIPT_RETRIES") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("AFRICA_PAY_SCRIPT_RETRIES must be a valid number")?,
            Err(_) => defaults.max_retries,
        };

        let base_delay = match env::var("AFRICA_PAY_RETRY_BASE_DELAY_MS") {
            Ok(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .context("AFRICA_PAY_RETRY_BASE_DELAY_MS must be a valid number")?,
            ),
            Err(_) => defaults.base_delay,
        };

        let dev_hosts = match env::var("AFRICA_PAY_DEV_HOSTS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.dev_hosts,
        };

        let config = LoaderConfig {
            timeout,
            max_retries,
            base_delay,
            dev_hosts,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(anyhow!("Script timeout must be greater than 0"));
        }

        if self.base_delay.is_zero() {
            return Err(anyhow!("Retry base delay must be greater than 0"));
        }

        if self.max_retries > MAX_ALLOWED_RETRIES {
            return Err(anyhow!(
                "Script retries must be at most {}, got {}",
                MAX_ALLOWED_RETRIES,
                self.max_retries
            ));
        }

        if self.dev_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(anyhow!("Development hosts cannot contain empty entries"));
        }

        Ok(())
    }

    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        backoff_delay(self.base_delay, attempt)
    }
}

/// Delay before the retry that follows the 0-indexed `attempt`:
/// `base_delay * 2^attempt`.
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay.saturating_mul(2_u32.saturating_pow(attempt))
}
