//! Scalar gain with saturation.

use crate::constants::GAIN_FACTOR;
use crate::dsp::block_scale;
use crate::frame::{samples_in, silence, Frame, FRAME_SAMPLES};

use super::Transform;

/// Multiplies every captured sample by a fixed gain, clamping to the `i32`
/// range instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturatingGain {
    gain: f32,
}

impl SaturatingGain {
    /// Create a gain stage. Intended for `gain >= 0.0`.
    pub const fn new(gain: f32) -> Self {
        SaturatingGain { gain }
    }

    /// Configured gain factor.
    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl Default for SaturatingGain {
    fn default() -> Self {
        SaturatingGain::new(GAIN_FACTOR)
    }
}

impl Transform for SaturatingGain {
    const NAME: &'static str = "saturating-gain";

    fn apply(&self, frame: &mut Frame, bytes_read: usize) {
        let n = samples_in(bytes_read).min(FRAME_SAMPLES);
        let samples = &mut frame[..n];

        if self.gain == 1.0 {
            // unity: nothing to do
        } else if self.gain == 0.0 {
            silence(samples);
        } else {
            block_scale(samples, self.gain as f64);
        }
    }
}
