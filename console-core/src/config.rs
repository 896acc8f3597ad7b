use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

use crate::error::{Error, Result};

/// Base name of the optional config file looked up in the working directory
/// (`console-client.toml`, `.yaml`, `.json`, ...).
pub const CONFIG_FILE: &str = "console-client";

pub const DEFAULT_CONSOLES: [&str; 4] = ["ps5", "xbox", "ps4", "switch"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    /// Per-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub server: ServerConfig,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub interval_secs: u64,
    pub burst_size: u32,
    pub burst_spacing_ms: u64,
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn burst_spacing(&self) -> Duration {
        Duration::from_millis(self.burst_spacing_ms)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            burst_size: 20,
            burst_spacing_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub console: ConsoleConfig,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Defaults, then `console-client.*` if present, then process environment.
    pub fn load() -> Result<Self> {
        Self::from_sources(Some(CONFIG_FILE), |key| env::var(key).ok())
    }

    pub fn from_sources<F>(file: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScheduleConfig::default();
        let mut cfg = config::Config::builder()
            .set_default("console.server.hostname", "localhost")?
            .set_default("console.server.port", 8083)?
            .set_default("console.names", DEFAULT_CONSOLES.to_vec())?
            .set_default("schedule.interval_secs", defaults.interval_secs)?
            .set_default("schedule.burst_size", defaults.burst_size)?
            .set_default("schedule.burst_spacing_ms", defaults.burst_spacing_ms)?;

        if let Some(name) = file {
            cfg = cfg.add_source(config::File::with_name(name).required(false));
        }

        if let Some(hostname) = lookup("CONSOLE_SERVER_HOSTNAME") {
            cfg = cfg.set_override("console.server.hostname", hostname)?;
        }
        if let Some(port) = lookup("CONSOLE_SERVER_PORT") {
            cfg = cfg.set_override("console.server.port", parse_env::<u16>("CONSOLE_SERVER_PORT", &port)?)?;
        }
        if let Some(timeout) = lookup("CONSOLE_SERVER_TIMEOUT_MS") {
            cfg = cfg.set_override(
                "console.server.timeout_ms",
                parse_env::<u64>("CONSOLE_SERVER_TIMEOUT_MS", &timeout)?,
            )?;
        }
        if let Some(names) = lookup("CONSOLE_NAMES") {
            let names: Vec<String> = names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            cfg = cfg.set_override("console.names", names)?;
        }
        if let Some(interval) = lookup("SCHEDULE_INTERVAL_SECS") {
            cfg = cfg.set_override(
                "schedule.interval_secs",
                parse_env::<u64>("SCHEDULE_INTERVAL_SECS", &interval)?,
            )?;
        }
        if let Some(size) = lookup("SCHEDULE_BURST_SIZE") {
            cfg = cfg.set_override("schedule.burst_size", parse_env::<u32>("SCHEDULE_BURST_SIZE", &size)?)?;
        }
        if let Some(spacing) = lookup("SCHEDULE_BURST_SPACING_MS") {
            cfg = cfg.set_override(
                "schedule.burst_spacing_ms",
                parse_env::<u64>("SCHEDULE_BURST_SPACING_MS", &spacing)?,
            )?;
        }

        let mut config: Config = cfg.build()?.try_deserialize()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Strips surrounding whitespace from console names and hostname,
    /// whichever source they came from.
    pub fn normalize(&mut self) {
        for name in &mut self.console.names {
            *name = name.trim().to_string();
        }
        self.console.server.hostname = self.console.server.hostname.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.console.names.is_empty() {
            return Err(Error::validation("console.names must not be empty"));
        }
        if self.console.names.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::validation("console.names must not contain blank names"));
        }
        if self.console.server.hostname.trim().is_empty() {
            return Err(Error::validation("console.server.hostname must not be empty"));
        }
        if self.schedule.interval_secs == 0 {
            return Err(Error::validation("schedule.interval_secs must be at least 1"));
        }
        if self.schedule.burst_size == 0 {
            return Err(Error::validation("schedule.burst_size must be at least 1"));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("{key} has invalid value {value:?}")))
}
