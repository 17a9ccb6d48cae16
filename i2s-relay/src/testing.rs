//! Scripted I²S channel doubles for unit and integration tests.
//!
//! Each mock plays back a fixed script of steps, one per transfer, so a test
//! can line up "full frame, fault, short frame" sequences without hardware.

use thiserror::Error;

use crate::config::StdConfig;
use crate::frame::{Frame, Sample, FRAME_SAMPLES, SAMPLE_BYTES};
use crate::session::{I2sChannel, I2sRx, I2sTx, Timeout};

const MAX_STEPS: usize = 16;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    #[error("timed out")]
    Timeout,
    #[error("invalid state")]
    InvalidState,
    #[error("script exhausted")]
    Exhausted,
}

/// Lifecycle bookkeeping common to both directions.
#[derive(Debug, Default)]
pub struct ChannelState {
    pub inits: u32,
    pub enabled: bool,
    pub transfers: u32,
    pub last_timeout: Option<Timeout>,
    pub last_bytes: usize,
    pub fail_init: Option<MockError>,
    pub fail_enable: Option<MockError>,
    pub fail_disable: Option<MockError>,
}

impl ChannelState {
    fn init(&mut self) -> Result<(), MockError> {
        if let Some(e) = self.fail_init {
            return Err(e);
        }
        self.inits += 1;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), MockError> {
        if let Some(e) = self.fail_enable {
            return Err(e);
        }
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MockError> {
        if let Some(e) = self.fail_disable {
            return Err(e);
        }
        self.enabled = false;
        Ok(())
    }
}

/// One scripted capture.
#[derive(Debug, Clone, Copy)]
pub enum RxStep {
    /// Fill by pair index: left = `l0 + i*ls`, right = `r0 + i*rs`.
    /// Reports `bytes` transferred.
    Stereo {
        l0: Sample,
        ls: Sample,
        r0: Sample,
        rs: Sample,
        bytes: usize,
    },
    /// Fail without touching the buffer.
    Fault(MockError),
    /// Overwrite the whole buffer with `junk`, then fail.
    CorruptFault(Sample, MockError),
}

impl RxStep {
    /// Fill by sample index: `start + i*step`, ignoring channel boundaries.
    pub const fn ramp(start: Sample, step: Sample, bytes: usize) -> Self {
        // pair i holds samples 2i and 2i+1
        RxStep::Stereo {
            l0: start,
            ls: step.wrapping_mul(2),
            r0: start.wrapping_add(step),
            rs: step.wrapping_mul(2),
            bytes,
        }
    }

    /// Every sample set to `value`.
    pub const fn constant(value: Sample, bytes: usize) -> Self {
        RxStep::Stereo {
            l0: value,
            ls: 0,
            r0: value,
            rs: 0,
            bytes,
        }
    }
}

/// Scripted capture channel.
pub struct MockRx {
    steps: [RxStep; MAX_STEPS],
    len: usize,
    pos: usize,
    pub state: ChannelState,
}

impl MockRx {
    pub fn new(script: &[RxStep]) -> Self {
        assert!(script.len() <= MAX_STEPS);
        let mut steps = [RxStep::Fault(MockError::Exhausted); MAX_STEPS];
        steps[..script.len()].copy_from_slice(script);
        MockRx {
            steps,
            len: script.len(),
            pos: 0,
            state: ChannelState::default(),
        }
    }

    /// Number of script steps consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl I2sChannel for MockRx {
    type Error = MockError;

    fn init_std_mode(&mut self, _config: &StdConfig) -> Result<(), MockError> {
        self.state.init()
    }

    fn enable(&mut self) -> Result<(), MockError> {
        self.state.enable()
    }

    fn disable(&mut self) -> Result<(), MockError> {
        self.state.disable()
    }
}

impl I2sRx for MockRx {
    fn read(&mut self, dest: &mut [Sample], timeout: Timeout) -> Result<usize, MockError> {
        self.state.transfers += 1;
        self.state.last_timeout = Some(timeout);

        if self.pos >= self.len {
            return Err(MockError::Exhausted);
        }
        let step = self.steps[self.pos];
        self.pos += 1;

        match step {
            RxStep::Stereo { l0, ls, r0, rs, bytes } => {
                let n = (bytes / SAMPLE_BYTES).min(dest.len());
                for (i, s) in dest[..n].iter_mut().enumerate() {
                    let pair = (i / 2) as Sample;
                    *s = if i % 2 == 0 {
                        l0.wrapping_add(pair.wrapping_mul(ls))
                    } else {
                        r0.wrapping_add(pair.wrapping_mul(rs))
                    };
                }
                self.state.last_bytes = bytes;
                Ok(bytes)
            }
            RxStep::Fault(e) => Err(e),
            RxStep::CorruptFault(junk, e) => {
                dest.fill(junk);
                Err(e)
            }
        }
    }
}

/// One scripted playback. An exhausted script accepts everything.
#[derive(Debug, Clone, Copy)]
pub enum TxStep {
    Accept,
    /// Accept at most this many bytes.
    Short(usize),
    Fault(MockError),
}

/// Scripted playback channel that records what it was handed.
pub struct MockTx {
    steps: [TxStep; MAX_STEPS],
    len: usize,
    pos: usize,
    pub state: ChannelState,
    /// Samples of the last accepted write; the tail past `state.last_bytes`
    /// is zero.
    pub last: Frame,
    pub writes: u32,
    pub total_bytes: usize,
}

impl MockTx {
    pub fn new(script: &[TxStep]) -> Self {
        assert!(script.len() <= MAX_STEPS);
        let mut steps = [TxStep::Accept; MAX_STEPS];
        steps[..script.len()].copy_from_slice(script);
        MockTx {
            steps,
            len: script.len(),
            pos: 0,
            state: ChannelState::default(),
            last: [0; FRAME_SAMPLES],
            writes: 0,
            total_bytes: 0,
        }
    }

    /// Samples of the last accepted write.
    pub fn last_samples(&self) -> &[Sample] {
        &self.last[..self.state.last_bytes / SAMPLE_BYTES]
    }
}

impl I2sChannel for MockTx {
    type Error = MockError;

    fn init_std_mode(&mut self, _config: &StdConfig) -> Result<(), MockError> {
        self.state.init()
    }

    fn enable(&mut self) -> Result<(), MockError> {
        self.state.enable()
    }

    fn disable(&mut self) -> Result<(), MockError> {
        self.state.disable()
    }
}

impl I2sTx for MockTx {
    fn write(&mut self, src: &[Sample], bytes: usize, timeout: Timeout) -> Result<usize, MockError> {
        self.state.transfers += 1;
        self.state.last_timeout = Some(timeout);

        let step = if self.pos < self.len {
            self.pos += 1;
            self.steps[self.pos - 1]
        } else {
            TxStep::Accept
        };

        let accepted = match step {
            TxStep::Accept => bytes,
            TxStep::Short(max) => bytes.min(max),
            TxStep::Fault(e) => return Err(e),
        };

        let n = (accepted / SAMPLE_BYTES).min(src.len()).min(FRAME_SAMPLES);
        self.last = [0; FRAME_SAMPLES];
        self.last[..n].copy_from_slice(&src[..n]);
        self.state.last_bytes = accepted;
        self.writes += 1;
        self.total_bytes += accepted;
        Ok(accepted)
    }
}
