//! Peripheral session: the configured RX/TX endpoint pair.
//!
//! The register-level driver is an external collaborator reached through the
//! [`I2sRx`] / [`I2sTx`] traits. [`I2sSession`] owns one of each, applies the
//! standard-mode configuration, and gates transfers on the enable lifecycle.
//! It is created once at startup and handed to the passthrough loop by
//! exclusive reference, so there are no process-wide channel handles.
//!
//! ```text
//!   mic ──► I2sRx ──read()──►  frame  ──write()──► I2sTx ──► amp
//!           └──────────── I2sSession ───────────────┘
//! ```
//!
//! Both transfers block the calling context until the requested bytes have
//! moved or the [`Timeout`] elapses. The relay always uses
//! [`Timeout::Forever`] in steady state.

use core::fmt;

use log::{info, warn};

use crate::config::{I2sConfig, StdConfig};
use crate::constants::LOG_TARGET;
use crate::control::AudioControl;
use crate::error::{Endpoint, SessionError, SetupError, SetupStep};
use crate::frame::{byte_len, Sample};

/// How long a blocking transfer may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Block until the transfer completes.
    Forever,
    /// Give up after this many milliseconds.
    Millis(u32),
}

/// Common surface of one I²S direction.
pub trait I2sChannel {
    /// Driver fault. Displayed verbatim in the relay's error log lines.
    type Error: fmt::Debug + fmt::Display;

    /// Apply the standard-mode clock/slot/GPIO configuration.
    fn init_std_mode(&mut self, config: &StdConfig) -> Result<(), Self::Error>;

    /// Start the channel's DMA.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop the channel's DMA.
    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Capture direction.
pub trait I2sRx: I2sChannel {
    /// Block until `dest` is full or `timeout` elapses.
    ///
    /// Returns the number of bytes written into `dest`.
    fn read(&mut self, dest: &mut [Sample], timeout: Timeout) -> Result<usize, Self::Error>;
}

/// Playback direction.
pub trait I2sTx: I2sChannel {
    /// Block until the first `bytes` bytes of `src` are queued for
    /// transmission or `timeout` elapses.
    ///
    /// Returns the number of bytes taken from `src`.
    fn write(&mut self, src: &[Sample], bytes: usize, timeout: Timeout)
        -> Result<usize, Self::Error>;
}

/// Configured full-duplex I²S endpoint pair.
pub struct I2sSession<Rx, Tx> {
    rx: Rx,
    tx: Tx,
    config: I2sConfig,
    enabled: bool,
}

impl<Rx, Tx, E> I2sSession<Rx, Tx>
where
    Rx: I2sRx<Error = E>,
    Tx: I2sTx<Error = E>,
    E: fmt::Debug + fmt::Display,
{
    /// Validate `config` and initialize both channels in standard mode.
    ///
    /// The session starts disabled.
    pub fn new(mut rx: Rx, mut tx: Tx, config: I2sConfig) -> Result<Self, SetupError<E>> {
        config.validate()?;

        rx.init_std_mode(&config.std).map_err(|error| SetupError::Endpoint {
            endpoint: Endpoint::Rx,
            step: SetupStep::Init,
            error,
        })?;
        tx.init_std_mode(&config.std).map_err(|error| SetupError::Endpoint {
            endpoint: Endpoint::Tx,
            step: SetupStep::Init,
            error,
        })?;

        Ok(I2sSession {
            rx,
            tx,
            config,
            enabled: false,
        })
    }

    /// Initialize and enable both channels. Any error is fatal for the relay.
    pub fn open(rx: Rx, tx: Tx, config: I2sConfig) -> Result<Self, SetupError<E>> {
        let mut session = Self::new(rx, tx, config)?;
        session.enable()?;
        info!(
            target: LOG_TARGET,
            "I2S port {} up: {} Hz, {}-bit stereo, {} x {} pair DMA",
            config.channel.port,
            config.std.clock.sample_rate_hz,
            config.std.slot.data_bits,
            config.channel.dma_desc_num,
            config.channel.dma_frame_num,
        );
        Ok(session)
    }

    /// Capture into `dest`, using its full length as the byte capacity.
    ///
    /// A driver reporting more bytes than `dest` holds is clamped to the
    /// capacity.
    pub fn read(
        &mut self,
        dest: &mut [Sample],
        timeout: Timeout,
    ) -> Result<usize, SessionError<E>> {
        if !self.enabled {
            return Err(SessionError::Disabled);
        }
        let capacity = byte_len(dest);
        let n = self.rx.read(dest, timeout).map_err(SessionError::Driver)?;
        if n > capacity {
            warn!(target: LOG_TARGET, "RX reported {} bytes into a {} byte buffer", n, capacity);
            return Ok(capacity);
        }
        Ok(n)
    }

    /// Emit the first `bytes` bytes of `src`.
    ///
    /// `bytes` is clamped to the length of `src`, and the reported count to
    /// the clamped request.
    pub fn write(
        &mut self,
        src: &[Sample],
        bytes: usize,
        timeout: Timeout,
    ) -> Result<usize, SessionError<E>> {
        if !self.enabled {
            return Err(SessionError::Disabled);
        }
        let bytes = bytes.min(byte_len(src));
        let n = self.tx.write(src, bytes, timeout).map_err(SessionError::Driver)?;
        Ok(n.min(bytes))
    }

    /// Configuration the session was opened with.
    pub fn config(&self) -> &I2sConfig {
        &self.config
    }

    pub fn rx(&self) -> &Rx {
        &self.rx
    }

    pub fn tx(&self) -> &Tx {
        &self.tx
    }

    /// Tear the session apart, returning the channel drivers.
    pub fn into_parts(self) -> (Rx, Tx) {
        (self.rx, self.tx)
    }
}

impl<Rx, Tx, E> AudioControl for I2sSession<Rx, Tx>
where
    Rx: I2sRx<Error = E>,
    Tx: I2sTx<Error = E>,
    E: fmt::Debug + fmt::Display,
{
    type Error = SetupError<E>;

    /// Enable RX, then TX. If TX fails, RX is stopped again.
    fn enable(&mut self) -> Result<(), Self::Error> {
        if self.enabled {
            return Ok(());
        }
        self.rx.enable().map_err(|error| SetupError::Endpoint {
            endpoint: Endpoint::Rx,
            step: SetupStep::Enable,
            error,
        })?;
        if let Err(error) = self.tx.enable() {
            if let Err(e) = self.rx.disable() {
                warn!(target: LOG_TARGET, "RX left running after TX enable failed: {}", e);
            }
            return Err(SetupError::Endpoint {
                endpoint: Endpoint::Tx,
                step: SetupStep::Enable,
                error,
            });
        }
        self.enabled = true;
        Ok(())
    }

    /// Disable both channels. Both are attempted; the first failure wins.
    fn disable(&mut self) -> Result<(), Self::Error> {
        if !self.enabled {
            return Ok(());
        }
        self.enabled = false;
        let rx = self.rx.disable().map_err(|error| SetupError::Endpoint {
            endpoint: Endpoint::Rx,
            step: SetupStep::Disable,
            error,
        });
        let tx = self.tx.disable().map_err(|error| SetupError::Endpoint {
            endpoint: Endpoint::Tx,
            step: SetupStep::Disable,
            error,
        });
        rx.and(tx)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
