use embassy_time::{Duration, Timer};

use crate::actuator::Indicator;

/// Time the indicator stays lit on each beat.
pub const PULSE_ON: Duration = Duration::from_millis(250);
/// Dark time between beats.
pub const PULSE_OFF: Duration = Duration::from_millis(4750);

/// Blink `indicator` once: on for [`PULSE_ON`], then off for [`PULSE_OFF`].
pub async fn beat<I: Indicator>(indicator: &mut I) {
    trace!("heartbeat");
    indicator.turn_on().await;
    Timer::after(PULSE_ON).await;
    indicator.turn_off().await;
    Timer::after(PULSE_OFF).await;
}

/// Blink forever.
pub async fn heartbeat<I: Indicator>(indicator: &mut I) -> ! {
    info!("heartbeat: enabled");
    loop {
        beat(indicator).await;
    }
}
