//! Pin-level parts around the I²S bus.
//!
//! The microphone needs nothing but clocks; it only has to be given time to
//! settle after BCLK starts. The amplifier has a shutdown pin that gates its
//! output stage. Both are driven through `embedded-hal` so the board support
//! crate of the target supplies the pins and the delay.
//!
//! # Feature gate
//!
//! This module is available when the `max98357` feature is enabled (on by default).

mod max98357;

pub use max98357::Max98357;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::constants::LOG_TARGET;

/// Wait after the bit clock starts before microphone samples are trusted.
pub const MIC_SETTLE_MS: u32 = 50;

/// Block for [`MIC_SETTLE_MS`] so the first captured frames are not the
/// microphone's power-up transient.
pub fn settle_microphone<D: DelayNs>(delay: &mut D) {
    debug!(target: LOG_TARGET, "Waiting {} ms for microphone to settle", MIC_SETTLE_MS);
    delay.delay_ms(MIC_SETTLE_MS);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn settle_waits_full_interval() {
        let mut delay = CountingDelay { total_ns: 0 };

        settle_microphone(&mut delay);

        assert_eq!(delay.total_ns, MIC_SETTLE_MS as u64 * 1_000_000);
    }
}
