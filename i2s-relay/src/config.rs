//! Typed I²S peripheral configuration.
//!
//! Mirrors what a standard-mode I²S driver needs to bring up a full-duplex
//! channel pair: a channel section (controller, role, DMA sizing) and a
//! standard-mode section (clock, slot layout, GPIO routing). The only
//! instance the relay uses is [`I2S_CONFIG`], assembled from
//! [`crate::constants`] at compile time.

use crate::constants::{
    DMA_DESC_NUM, FRAME_PAIRS, I2S_PORT, PIN_BCLK, PIN_DIN, PIN_DOUT, PIN_WS, SAMPLE_BITS,
    SAMPLE_RATE_HZ,
};
use crate::error::ConfigError;
use crate::frame::SAMPLE_BYTES;

/// Which side drives the bit and word clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// This controller generates BCLK and WS.
    Master,
    /// BCLK and WS come from the other end of the bus.
    Slave,
}

/// Channel layout inside one WS period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMode {
    /// Only one slot carries data.
    Mono,
    /// Left and right slots both carry data.
    Stereo,
}

/// Wire framing of the standard-mode slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotFormat {
    /// Philips I²S: data lags WS by one BCLK.
    Philips,
    /// MSB-justified: data aligned with the WS edge.
    Msb,
}

/// Controller-level channel settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub port: u8,
    pub role: Role,
    /// Number of DMA descriptors per direction.
    pub dma_desc_num: u32,
    /// Stereo pairs per DMA descriptor.
    pub dma_frame_num: u32,
    /// Send silence when the TX DMA runs dry instead of repeating old data.
    pub auto_clear: bool,
}

/// Sample clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub sample_rate_hz: u32,
}

/// Slot width and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConfig {
    pub data_bits: u32,
    pub mode: SlotMode,
    pub format: SlotFormat,
}

/// Pin routing. `None` leaves the signal unconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    pub mclk: Option<u8>,
    pub bclk: u8,
    pub ws: u8,
    pub dout: u8,
    pub din: u8,
    pub bclk_inverted: bool,
    pub ws_inverted: bool,
}

/// Standard-mode settings applied to both RX and TX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdConfig {
    pub clock: ClockConfig,
    pub slot: SlotConfig,
    pub gpio: GpioConfig,
}

/// Full configuration of the RX/TX channel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sConfig {
    pub channel: ChannelConfig,
    pub std: StdConfig,
}

/// The relay's one and only peripheral configuration.
pub const I2S_CONFIG: I2sConfig = I2sConfig {
    channel: ChannelConfig {
        port: I2S_PORT,
        role: Role::Master,
        dma_desc_num: DMA_DESC_NUM,
        dma_frame_num: FRAME_PAIRS as u32,
        auto_clear: true,
    },
    std: StdConfig {
        clock: ClockConfig {
            sample_rate_hz: SAMPLE_RATE_HZ,
        },
        slot: SlotConfig {
            data_bits: SAMPLE_BITS,
            mode: SlotMode::Stereo,
            format: SlotFormat::Philips,
        },
        gpio: GpioConfig {
            mclk: None,
            bclk: PIN_BCLK,
            ws: PIN_WS,
            dout: PIN_DOUT,
            din: PIN_DIN,
            bclk_inverted: false,
            ws_inverted: false,
        },
    },
};

impl I2sConfig {
    /// Check that this configuration can back the relay's fixed-size frame.
    ///
    /// The frame buffer is sized at compile time from the same constants, so
    /// a mismatch here means the DMA would hand over more (or fewer) pairs
    /// per descriptor than one read can hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.dma_desc_num == 0 {
            return Err(ConfigError::NoDmaDescriptors);
        }
        if self.channel.dma_frame_num as usize != FRAME_PAIRS {
            return Err(ConfigError::FrameLengthMismatch {
                dma: self.channel.dma_frame_num,
                frame: FRAME_PAIRS,
            });
        }
        if self.std.clock.sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.std.slot.data_bits as usize != SAMPLE_BYTES * 8 {
            return Err(ConfigError::SampleWidthMismatch(self.std.slot.data_bits));
        }
        if self.std.slot.mode != SlotMode::Stereo {
            return Err(ConfigError::NotStereo);
        }
        let g = &self.std.gpio;
        // MCLK last so an unrouted MCLK simply drops off the end
        let pins = [g.bclk, g.ws, g.dout, g.din, g.mclk.unwrap_or(0)];
        let routed = if g.mclk.is_some() { pins.len() } else { pins.len() - 1 };
        let pins = &pins[..routed];
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].contains(a) {
                return Err(ConfigError::PinConflict);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(I2S_CONFIG.validate(), Ok(()));
    }

    #[test]
    fn default_config_values() {
        let c = I2S_CONFIG;
        assert_eq!(c.channel.role, Role::Master);
        assert_eq!(c.channel.dma_desc_num, 2);
        assert_eq!(c.channel.dma_frame_num, 64);
        assert!(c.channel.auto_clear);
        assert_eq!(c.std.clock.sample_rate_hz, 48_000);
        assert_eq!(c.std.slot.data_bits, 32);
        assert_eq!(c.std.slot.format, SlotFormat::Philips);
        assert_eq!(c.std.gpio.mclk, None);
        assert_eq!((c.std.gpio.bclk, c.std.gpio.ws), (8, 6));
        assert_eq!((c.std.gpio.dout, c.std.gpio.din), (9, 7));
    }

    #[test]
    fn rejects_zero_descriptors() {
        let mut c = I2S_CONFIG;
        c.channel.dma_desc_num = 0;
        assert_eq!(c.validate(), Err(ConfigError::NoDmaDescriptors));
    }

    #[test]
    fn rejects_frame_mismatch() {
        let mut c = I2S_CONFIG;
        c.channel.dma_frame_num = 128;
        assert_eq!(
            c.validate(),
            Err(ConfigError::FrameLengthMismatch { dma: 128, frame: 64 })
        );
    }

    #[test]
    fn rejects_wrong_width_and_mono() {
        let mut c = I2S_CONFIG;
        c.std.slot.data_bits = 16;
        assert_eq!(c.validate(), Err(ConfigError::SampleWidthMismatch(16)));

        let mut c = I2S_CONFIG;
        c.std.slot.mode = SlotMode::Mono;
        assert_eq!(c.validate(), Err(ConfigError::NotStereo));
    }

    #[test]
    fn rejects_zero_rate() {
        let mut c = I2S_CONFIG;
        c.std.clock.sample_rate_hz = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroSampleRate));
    }

    #[test]
    fn rejects_shared_pins() {
        let mut c = I2S_CONFIG;
        c.std.gpio.din = c.std.gpio.dout;
        assert_eq!(c.validate(), Err(ConfigError::PinConflict));

        let mut c = I2S_CONFIG;
        c.std.gpio.din = c.std.gpio.bclk;
        assert_eq!(c.validate(), Err(ConfigError::PinConflict));

        let mut c = I2S_CONFIG;
        c.std.gpio.dout = c.std.gpio.ws;
        assert_eq!(c.validate(), Err(ConfigError::PinConflict));
    }

    #[test]
    fn checks_mclk_only_when_routed() {
        let mut c = I2S_CONFIG;
        c.std.gpio.mclk = Some(c.std.gpio.bclk);
        assert_eq!(c.validate(), Err(ConfigError::PinConflict));

        c.std.gpio.mclk = Some(0);
        assert_eq!(c.validate(), Ok(()));

        c.std.gpio.mclk = None;
        assert_eq!(c.validate(), Ok(()));
    }
}
