//! Per-frame transform policies.
//!
//! | Transform | Cargo feature | Effect |
//! |-----------|---------------|--------|
//! | [`SaturatingGain`] | (default) | `clamp(round(s * gain))` on every sample read |
//! | [`MonoDuplicate`] | `mono-duplicate` | left channel copied into both slots |
//! | [`Identity`] | none | frame left as captured |
//!
//! Exactly one policy is compiled into the relay as [`ActiveTransform`].
//! Transforms only ever look at the prefix of the frame covered by the byte
//! count the driver actually reported; the rest of the buffer is neither read
//! nor written.

mod gain;
mod mono;

pub use gain::SaturatingGain;
pub use mono::MonoDuplicate;

use crate::frame::Frame;

/// A pure function of (captured frame, bytes captured) to the frame to emit.
pub trait Transform {
    /// Short name used in log lines.
    const NAME: &'static str;

    /// Rewrite `frame` in place. Only the first `bytes_read` bytes hold
    /// captured data.
    fn apply(&self, frame: &mut Frame, bytes_read: usize);
}

/// Leaves the frame untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transform for Identity {
    const NAME: &'static str = "identity";

    #[inline]
    fn apply(&self, _frame: &mut Frame, _bytes_read: usize) {}
}

/// The transform compiled into this build.
#[cfg(feature = "mono-duplicate")]
pub type ActiveTransform = MonoDuplicate;

/// The transform compiled into this build.
#[cfg(not(feature = "mono-duplicate"))]
pub type ActiveTransform = SaturatingGain;

/// Instance of [`ActiveTransform`] built from the compile-time constants.
#[cfg(feature = "mono-duplicate")]
pub const ACTIVE_TRANSFORM: ActiveTransform = MonoDuplicate;

/// Instance of [`ActiveTransform`] built from the compile-time constants.
#[cfg(not(feature = "mono-duplicate"))]
pub const ACTIVE_TRANSFORM: ActiveTransform =
    SaturatingGain::new(crate::constants::GAIN_FACTOR);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FRAME_BYTES, FRAME_SAMPLES};

    #[test]
    fn identity_is_a_no_op() {
        let mut frame: Frame = core::array::from_fn(|i| i as i32 - 64);
        let before = frame;

        Identity.apply(&mut frame, FRAME_BYTES);

        assert_eq!(frame, before);
    }

    #[cfg(not(feature = "mono-duplicate"))]
    #[test]
    fn active_transform_is_gain_by_default() {
        assert_eq!(ActiveTransform::NAME, "saturating-gain");
        assert_eq!(ACTIVE_TRANSFORM.gain(), crate::constants::GAIN_FACTOR);

        let mut frame: Frame = [1_000_000; FRAME_SAMPLES];
        ACTIVE_TRANSFORM.apply(&mut frame, FRAME_BYTES);
        assert!(frame.iter().all(|&s| s == 2_000_000));
    }

    #[cfg(feature = "mono-duplicate")]
    #[test]
    fn active_transform_is_mono_duplicate() {
        assert_eq!(ActiveTransform::NAME, "mono-duplicate");
    }
}
