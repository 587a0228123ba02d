//! Output capabilities driven by the firmware.

/// On/off state of a binary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    Off,
    On,
}

impl SwitchState {
    /// Text substituted into the status page.
    pub const fn as_str(self) -> &'static str {
        match self {
            SwitchState::Off => "off",
            SwitchState::On => "on",
        }
    }
}

impl From<bool> for SwitchState {
    fn from(on: bool) -> Self {
        if on { SwitchState::On } else { SwitchState::Off }
    }
}

/// The remotely controlled output.
pub trait Actuator {
    fn turn_on(&mut self);
    fn turn_off(&mut self);
    /// Read back the current output level.
    fn is_on(&self) -> bool;

    fn state(&self) -> SwitchState {
        SwitchState::from(self.is_on())
    }
}

/// The liveness LED blinked by the heartbeat task.
///
/// Async because the Pico W onboard LED sits behind the CYW43 radio.
#[allow(async_fn_in_trait)]
pub trait Indicator {
    async fn turn_on(&mut self);
    async fn turn_off(&mut self);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn turn_on(&mut self) {
        (**self).turn_on();
    }

    fn turn_off(&mut self) {
        (**self).turn_off();
    }

    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pin(bool);

    impl Actuator for Pin {
        fn turn_on(&mut self) {
            self.0 = true;
        }

        fn turn_off(&mut self) {
            self.0 = false;
        }

        fn is_on(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn state_follows_output_level() {
        let mut pin = Pin(false);
        assert_eq!(pin.state(), SwitchState::Off);
        pin.turn_on();
        assert_eq!(pin.state(), SwitchState::On);
        assert_eq!(pin.state().as_str(), "on");
    }

    fn switch_on(mut actuator: impl Actuator) -> SwitchState {
        actuator.turn_on();
        actuator.state()
    }

    #[test]
    fn mutable_reference_drives_the_same_output() {
        let mut pin = Pin(false);
        assert_eq!(switch_on(&mut pin), SwitchState::On);
        assert!(pin.is_on());
    }
}
