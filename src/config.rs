//! Build-time configuration.
//!
//! Values come from the environment of the `cargo build` invocation and are validated
//! once at boot by [`Config::from_env`].

use core::fmt;
use core::str::FromStr;

use embassy_time::Duration;

/// Page served for every non-action path. Must contain [`crate::template::STATUS_MARKER`].
pub const TEMPLATE: &str = include_str!("../templates/index.html");

pub const DEFAULT_HOSTNAME: &str = "picow-led";
pub const DEFAULT_MAX_WAIT: u32 = 10;
pub const DEFAULT_PORT: u16 = 80;
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// GPIO driving the external LED.
#[macro_export]
macro_rules! actuator_pin {
    ($p:expr) => {
        $p.PIN_15
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    Missing { key: &'static str },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { key } => write!(f, "{key} is not set"),
            ConfigError::InvalidNumber { key } => write!(f, "{key} is not a valid number"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiConfig {
    pub ssid: &'static str,
    /// Empty for an open network.
    pub password: &'static str,
    pub hostname: &'static str,
    /// Number of status polls before giving up.
    pub max_wait: u32,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub wifi: WifiConfig,
    pub server: ServerConfig,
    pub template: &'static str,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            "WIFI_SSID" => option_env!("WIFI_SSID"),
            "WIFI_PASSWORD" => option_env!("WIFI_PASSWORD"),
            "WIFI_HOSTNAME" => option_env!("WIFI_HOSTNAME"),
            "WIFI_MAXWAIT" => option_env!("WIFI_MAXWAIT"),
            "SERVER_PORT" => option_env!("SERVER_PORT"),
            _ => None,
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<&'static str>,
    {
        let ssid = lookup("WIFI_SSID").ok_or(ConfigError::Missing { key: "WIFI_SSID" })?;
        let wifi = WifiConfig {
            ssid,
            password: lookup("WIFI_PASSWORD").unwrap_or(""),
            hostname: lookup("WIFI_HOSTNAME").unwrap_or(DEFAULT_HOSTNAME),
            max_wait: parse_or("WIFI_MAXWAIT", lookup("WIFI_MAXWAIT"), DEFAULT_MAX_WAIT)?,
            poll_interval: POLL_INTERVAL,
        };
        let server = ServerConfig {
            port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), DEFAULT_PORT)?,
        };
        Ok(Self {
            wifi,
            server,
            template: TEMPLATE,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key }),
    }
}
