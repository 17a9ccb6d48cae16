//! Compile-time parameters of the relay.
//!
//! Nothing here is configurable at runtime. The typed peripheral
//! configuration in [`crate::config`] is built from these values.

/// I²S sample clock in Hz.
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Width of one sample slot on the wire, in bits.
pub const SAMPLE_BITS: u32 = 32;

/// Number of stereo pairs per DMA frame (and per read/write call).
pub const FRAME_PAIRS: usize = 64;

/// Number of DMA descriptors per channel.
pub const DMA_DESC_NUM: u32 = 2;

/// Gain applied by the saturating-gain transform.
pub const GAIN_FACTOR: f32 = 2.0;

/// I²S controller index.
pub const I2S_PORT: u8 = 0;

/// Bit clock pin.
pub const PIN_BCLK: u8 = 8;
/// Word select (LRCLK) pin.
pub const PIN_WS: u8 = 6;
/// Serial data out, wired to the amplifier.
pub const PIN_DOUT: u8 = 9;
/// Serial data in, wired to the microphone.
pub const PIN_DIN: u8 = 7;

/// Stack size of the passthrough task in bytes.
pub const TASK_STACK_BYTES: usize = 4096;

/// Scheduler priority of the passthrough task.
pub const TASK_PRIORITY: u8 = 5;

/// Name of the passthrough task.
pub const TASK_NAME: &str = "audio_passthrough";

/// `log` target used by every message the relay emits.
pub const LOG_TARGET: &str = "AUDIO_PASSTHROUGH";

/// Duration of one frame at the configured sample rate, in microseconds.
pub const FRAME_PERIOD_US: u32 = (FRAME_PAIRS as u32 * 1_000_000) / SAMPLE_RATE_HZ;
