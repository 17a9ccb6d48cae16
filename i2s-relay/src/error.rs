//! Error types for setup, session misuse, and per-cycle transfer faults.
//!
//! Driver errors stay generic (`E` is the channel's associated `Error`), so
//! the relay never needs to know what a fault looks like on a given chip.

use core::fmt;

use thiserror::Error;

/// One side of the audio peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Capture (microphone).
    Rx,
    /// Playback (amplifier).
    Tx,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Rx => f.write_str("rx"),
            Endpoint::Tx => f.write_str("tx"),
        }
    }
}

/// Bring-up step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Init,
    Enable,
    Disable,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupStep::Init => f.write_str("init std mode"),
            SetupStep::Enable => f.write_str("enable"),
            SetupStep::Disable => f.write_str("disable"),
        }
    }
}

/// Rejected peripheral configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one DMA descriptor is required")]
    NoDmaDescriptors,
    #[error("DMA frame of {dma} pairs does not match the {frame}-pair frame buffer")]
    FrameLengthMismatch { dma: u32, frame: usize },
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,
    #[error("{0}-bit slots do not match the 32-bit sample type")]
    SampleWidthMismatch(u32),
    #[error("slot mode must be stereo")]
    NotStereo,
    #[error("two I2S signals are routed to the same pin")]
    PinConflict,
}

/// Fatal fault while bringing the peripheral up. The relay must not run.
#[derive(Debug, Error)]
pub enum SetupError<E> {
    #[error("invalid I2S configuration: {0}")]
    InvalidConfig(ConfigError),
    #[error("{endpoint} {step} failed: {error}")]
    Endpoint {
        endpoint: Endpoint,
        step: SetupStep,
        error: E,
    },
    #[error("I2S session is not enabled")]
    Disabled,
}

impl<E> From<ConfigError> for SetupError<E> {
    fn from(err: ConfigError) -> Self {
        SetupError::InvalidConfig(err)
    }
}

/// Failure of a single session transfer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError<E> {
    #[error("I2S session is not enabled")]
    Disabled,
    #[error("{0}")]
    Driver(E),
}

/// Transient fault that abandoned one passthrough cycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CycleError<E> {
    #[error("error reading from I2S: {0}")]
    Read(SessionError<E>),
    #[error("error writing to I2S: {0}")]
    Write(SessionError<E>),
}

impl<E> CycleError<E> {
    /// Endpoint whose transfer failed.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            CycleError::Read(_) => Endpoint::Rx,
            CycleError::Write(_) => Endpoint::Tx,
        }
    }
}
