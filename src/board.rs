//! Pico 2 W hardware: external LED on a GPIO, onboard LED and radio on the CYW43439.

use cyw43::{Control, JoinOptions, PowerManagementMode};
use embassy_net::{Ipv4Address, Stack};
use embassy_rp::gpio::Output;

use crate::actuator::{Actuator, Indicator};
use crate::network::{LinkStatus, WifiStation};

/// External LED wired to a plain GPIO output.
pub struct LedActuator(Output<'static>);

impl LedActuator {
    pub fn new(output: Output<'static>) -> Self {
        Self(output)
    }
}

impl Actuator for LedActuator {
    fn turn_on(&mut self) {
        self.0.set_high();
    }

    fn turn_off(&mut self) {
        self.0.set_low();
    }

    fn is_on(&self) -> bool {
        self.0.is_set_high()
    }
}

/// The onboard LED, wired to GPIO 0 of the radio chip.
pub struct OnboardLed(Control<'static>);

impl OnboardLed {
    pub fn new(control: Control<'static>) -> Self {
        Self(control)
    }
}

impl Indicator for OnboardLed {
    async fn turn_on(&mut self) {
        self.0.gpio_set(0, true).await;
    }

    async fn turn_off(&mut self) {
        self.0.gpio_set(0, false).await;
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum JoinState {
    Idle,
    Associated,
    Rejected,
}

/// CYW43 radio in station mode, paired with the network stack that runs DHCP on it.
pub struct Cyw43Station<'a> {
    control: &'a mut Control<'static>,
    stack: Stack<'a>,
    clm: &'a [u8],
    join: JoinState,
}

impl<'a> Cyw43Station<'a> {
    pub fn new(control: &'a mut Control<'static>, stack: Stack<'a>, clm: &'a [u8]) -> Self {
        Self {
            control,
            stack,
            clm,
            join: JoinState::Idle,
        }
    }
}

impl WifiStation for Cyw43Station<'_> {
    async fn activate(&mut self) {
        self.control.init(self.clm).await;
    }

    async fn disable_power_save(&mut self) {
        self.control
            .set_power_management(PowerManagementMode::Performance)
            .await;
    }

    async fn begin_join(&mut self, ssid: &str, password: &str) {
        let options = if password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(password.as_bytes())
        };
        self.join = match self.control.join(ssid, options).await {
            Ok(()) => JoinState::Associated,
            Err(e) => {
                warn!("network: join failed with status {}", e.status);
                JoinState::Rejected
            }
        };
    }

    fn status(&self) -> LinkStatus {
        match self.join {
            JoinState::Idle => LinkStatus::Down,
            JoinState::Rejected => LinkStatus::Failed,
            JoinState::Associated if self.stack.config_v4().is_some() => LinkStatus::Up,
            JoinState::Associated if self.stack.is_link_up() => LinkStatus::NoIp,
            JoinState::Associated => LinkStatus::Joining,
        }
    }

    fn address(&self) -> Option<Ipv4Address> {
        self.stack.config_v4().map(|config| config.address.address())
    }
}
