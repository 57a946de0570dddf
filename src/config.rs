//! Runtime configuration from the environment.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;

pub const ENV_CHANNEL_CAPACITY: &str = "DELIVERY_CHANNEL_CAPACITY";
pub const ENV_TIMEZONE: &str = "DELIVERY_TIMEZONE";
pub const ENV_TOAST_SECS: &str = "DELIVERY_TOAST_SECS";
pub const ENV_LOG: &str = "DELIVERY_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Mailbox size of every store actor.
    pub channel_capacity: usize,
    /// Timezone for dashboard days and hours.
    pub timezone: Tz,
    /// How long the new-order toast stays up.
    pub toast_duration: Duration,
    /// Overrides `RUST_LOG` when set.
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            timezone: chrono_tz::America::Sao_Paulo,
            toast_duration: Duration::from_secs(5),
            log_filter: None,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(None),
    }
}

impl AppConfig {
    /// Reads `.env.local` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let channel_capacity = parse::<usize>(&lookup, ENV_CHANNEL_CAPACITY)?.unwrap_or(defaults.channel_capacity);
        if channel_capacity == 0 {
            anyhow::bail!("{} must be at least 1", ENV_CHANNEL_CAPACITY);
        }

        let timezone = match lookup(ENV_TIMEZONE) {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("invalid value for {}: {}", ENV_TIMEZONE, e))?,
            None => defaults.timezone,
        };

        let toast_duration = parse::<u64>(&lookup, ENV_TOAST_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.toast_duration);

        let log_filter = lookup(ENV_LOG).filter(|f| !f.trim().is_empty());

        Ok(Self {
            channel_capacity,
            timezone,
            toast_duration,
            log_filter,
        })
    }
}
