//! Simulated I²S endpoints paced by a real-time sample clock.
//!
//! Each channel keeps an absolute deadline that advances by exactly one frame
//! period per transfer, so the loop is held to 48 kHz on average with no
//! accumulated drift, the same way DMA completion paces it on hardware.

use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, OutputPin};
use i2s_relay::config::StdConfig;
use i2s_relay::constants::{FRAME_PAIRS, LOG_TARGET, SAMPLE_RATE_HZ};
use i2s_relay::frame::{Sample, PAIR_BYTES, SAMPLE_BYTES};
use i2s_relay::session::{I2sChannel, I2sRx, I2sTx, Timeout};
use log::{debug, info};
use thiserror::Error;

/// Test tone on the microphone's left slot.
const TONE_HZ: f64 = 440.0;
/// Tone amplitude relative to full scale.
const TONE_LEVEL: f64 = 0.25;
/// Every this many frames the simulated RX DMA reports a fault.
const GLITCH_EVERY: u64 = 3_000;
/// Frames per speaker level report (about one second).
const REPORT_EVERY: u64 = (SAMPLE_RATE_HZ as u64) / FRAME_PAIRS as u64;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("ESP_ERR_TIMEOUT")]
    Timeout,
    #[error("ESP_ERR_INVALID_STATE")]
    InvalidState,
    #[error("ESP_FAIL (simulated DMA glitch)")]
    Glitch,
}

/// Frame pacing for one direction.
///
/// Enabling only arms the clock. The first frame boundary is one period after
/// the first transfer, not after enable.
struct FrameClock {
    period: Duration,
    running: bool,
    next: Option<Instant>,
}

impl FrameClock {
    fn new() -> Self {
        FrameClock {
            period: Duration::from_nanos(FRAME_PAIRS as u64 * 1_000_000_000 / SAMPLE_RATE_HZ as u64),
            running: false,
            next: None,
        }
    }

    fn start(&mut self) {
        self.running = true;
        self.next = None;
    }

    fn stop(&mut self) {
        self.running = false;
        self.next = None;
    }

    /// Block until the next frame boundary.
    fn wait(&mut self, timeout: Timeout) -> Result<(), SimError> {
        if !self.running {
            return Err(SimError::InvalidState);
        }
        let now = Instant::now();
        let deadline = *self.next.get_or_insert(now + self.period);
        if let Timeout::Millis(ms) = timeout {
            if deadline > now + Duration::from_millis(ms as u64) {
                thread::sleep(Duration::from_millis(ms as u64));
                return Err(SimError::Timeout);
            }
        }
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next = Some(deadline + self.period);
        Ok(())
    }
}

/// Microphone side: a sine on the left slot, silence on the right.
pub struct SimMic {
    clock: FrameClock,
    phase: f64,
    frames: u64,
}

impl SimMic {
    pub fn new() -> Self {
        SimMic {
            clock: FrameClock::new(),
            phase: 0.0,
            frames: 0,
        }
    }
}

impl Default for SimMic {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sChannel for SimMic {
    type Error = SimError;

    fn init_std_mode(&mut self, config: &StdConfig) -> Result<(), SimError> {
        debug!(
            target: LOG_TARGET,
            "rx std mode: {} Hz, din={}",
            config.clock.sample_rate_hz, config.gpio.din
        );
        Ok(())
    }

    fn enable(&mut self) -> Result<(), SimError> {
        self.clock.start();
        Ok(())
    }

    fn disable(&mut self) -> Result<(), SimError> {
        self.clock.stop();
        Ok(())
    }
}

impl I2sRx for SimMic {
    fn read(&mut self, dest: &mut [Sample], timeout: Timeout) -> Result<usize, SimError> {
        self.clock.wait(timeout)?;
        self.frames += 1;
        if self.frames % GLITCH_EVERY == 0 {
            return Err(SimError::Glitch);
        }

        let step = TAU * TONE_HZ / SAMPLE_RATE_HZ as f64;
        let amplitude = TONE_LEVEL * Sample::MAX as f64;
        for pair in dest.chunks_exact_mut(2) {
            pair[0] = (self.phase.sin() * amplitude) as Sample;
            pair[1] = 0;
            self.phase = (self.phase + step) % TAU;
        }
        Ok(dest.len() / 2 * PAIR_BYTES)
    }
}

/// Amplifier side: swallows frames and reports per-channel peaks.
pub struct SimSpeaker {
    clock: FrameClock,
    frames: u64,
    peak: (Sample, Sample),
}

impl SimSpeaker {
    pub fn new() -> Self {
        SimSpeaker {
            clock: FrameClock::new(),
            frames: 0,
            peak: (0, 0),
        }
    }
}

impl Default for SimSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sChannel for SimSpeaker {
    type Error = SimError;

    fn init_std_mode(&mut self, config: &StdConfig) -> Result<(), SimError> {
        debug!(
            target: LOG_TARGET,
            "tx std mode: {} Hz, dout={}",
            config.clock.sample_rate_hz, config.gpio.dout
        );
        Ok(())
    }

    fn enable(&mut self) -> Result<(), SimError> {
        self.clock.start();
        Ok(())
    }

    fn disable(&mut self) -> Result<(), SimError> {
        self.clock.stop();
        Ok(())
    }
}

impl I2sTx for SimSpeaker {
    fn write(&mut self, src: &[Sample], bytes: usize, timeout: Timeout) -> Result<usize, SimError> {
        self.clock.wait(timeout)?;

        let samples = &src[..(bytes / SAMPLE_BYTES).min(src.len())];
        for pair in samples.chunks_exact(2) {
            self.peak.0 = self.peak.0.max(pair[0].saturating_abs());
            self.peak.1 = self.peak.1.max(pair[1].saturating_abs());
        }

        self.frames += 1;
        if self.frames % REPORT_EVERY == 0 {
            info!(
                target: LOG_TARGET,
                "speaker: {} frames, peak L={:.1}% R={:.1}%",
                self.frames,
                self.peak.0 as f64 * 100.0 / Sample::MAX as f64,
                self.peak.1 as f64 * 100.0 / Sample::MAX as f64,
            );
            self.peak = (0, 0);
        }
        Ok(bytes)
    }
}

/// Stand-in for a GPIO; logs level changes.
pub struct SimPin {
    name: &'static str,
}

impl SimPin {
    pub fn new(name: &'static str) -> Self {
        SimPin { name }
    }
}

impl ErrorType for SimPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        debug!(target: LOG_TARGET, "{} low", self.name);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        debug!(target: LOG_TARGET, "{} high", self.name);
        Ok(())
    }
}

/// `DelayNs` over `thread::sleep`.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}
