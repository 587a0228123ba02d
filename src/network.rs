//! Joining the wireless network at boot.
//!
//! A single blocking-style attempt with bounded polling. Failure is final: the caller
//! is expected to abort startup.

use core::fmt;

use embassy_net::Ipv4Address;
use embassy_time::Timer;

use crate::config::WifiConfig;

/// Link state as reported by the radio, numbered like the CYW43 driver's status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    Down,
    Joining,
    /// Associated, still waiting for an address.
    NoIp,
    Up,
    Failed,
    NoNetwork,
    BadAuth,
}

impl LinkStatus {
    pub const fn code(self) -> i8 {
        match self {
            LinkStatus::Down => 0,
            LinkStatus::Joining => 1,
            LinkStatus::NoIp => 2,
            LinkStatus::Up => 3,
            LinkStatus::Failed => -1,
            LinkStatus::NoNetwork => -2,
            LinkStatus::BadAuth => -3,
        }
    }

    /// Connected, or failed for good. Either way there is no point polling further.
    pub const fn is_definitive(self) -> bool {
        let code = self.code();
        code < 0 || code >= 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionError {
    /// Last status seen before giving up.
    pub status: LinkStatus,
    /// Status polls performed.
    pub attempts: u32,
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "network connection failed (status {:?} after {} polls)",
            self.status, self.attempts
        )
    }
}

impl core::error::Error for ConnectionError {}

/// A Wi-Fi interface in station mode.
#[allow(async_fn_in_trait)]
pub trait WifiStation {
    async fn activate(&mut self);
    async fn disable_power_save(&mut self);
    /// Start associating. Progress is observed through [`WifiStation::status`].
    async fn begin_join(&mut self, ssid: &str, password: &str);
    fn status(&self) -> LinkStatus;
    fn address(&self) -> Option<Ipv4Address>;
}

/// Join the configured network and wait for an address.
///
/// Polls once per `poll_interval`, at most `max_wait` times, and stops early once the
/// status is definitive.
pub async fn connect<S: WifiStation>(
    station: &mut S,
    config: &WifiConfig,
) -> Result<Ipv4Address, ConnectionError> {
    station.activate().await;
    station.disable_power_save().await;
    info!("network: connecting to {}", config.ssid);
    station.begin_join(config.ssid, config.password).await;

    let mut attempts = 0;
    while attempts < config.max_wait {
        if station.status().is_definitive() {
            break;
        }
        attempts += 1;
        info!("network: waiting for connection...");
        Timer::after(config.poll_interval).await;
    }

    let status = station.status();
    match (status, station.address()) {
        (LinkStatus::Up, Some(address)) => {
            info!("network: connected, ip = {}", address);
            Ok(address)
        }
        _ => {
            error!("network: connection failed, status {}", status.code());
            Err(ConnectionError { status, attempts })
        }
    }
}
