//! MAX98357 class-D amplifier shutdown control.
//!
//! The amplifier is a pure I²S sink; the only thing software controls is the
//! SD_MODE pin. Low holds the part in shutdown, high runs it (channel
//! selection is done with the pull resistor on the board).

use embedded_hal::digital::OutputPin;
use log::info;

use crate::constants::LOG_TARGET;
use crate::control::AudioControl;

/// Amplifier driven through its SD_MODE pin.
pub struct Max98357<P> {
    sd_mode: P,
    enabled: bool,
}

impl<P: OutputPin> Max98357<P> {
    /// Take the SD_MODE pin and force the amplifier into shutdown.
    pub fn new(mut sd_mode: P) -> Result<Self, P::Error> {
        sd_mode.set_low()?;
        Ok(Max98357 {
            sd_mode,
            enabled: false,
        })
    }

    /// Give the pin back, leaving it in its current state.
    pub fn release(self) -> P {
        self.sd_mode
    }
}

impl<P: OutputPin> AudioControl for Max98357<P> {
    type Error = P::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.sd_mode.set_high()?;
        self.enabled = true;
        info!(target: LOG_TARGET, "Amplifier out of shutdown");
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.sd_mode.set_low()?;
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
