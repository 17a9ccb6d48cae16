//! Saturating sample arithmetic.
//!
//! Gain is applied in `f64`: every `i32 * f32` product is exactly
//! representable there (24-bit mantissa times 32-bit integer fits in 53
//! bits), so rounding and clamping see the true product.

use crate::frame::Sample;

/// Clamp a wide value to the `i32` range and convert.
///
/// NaN maps to zero.
#[inline(always)]
pub fn saturate32(val: f64) -> Sample {
    if val.is_nan() {
        0
    } else if val >= Sample::MAX as f64 {
        Sample::MAX
    } else if val <= Sample::MIN as f64 {
        Sample::MIN
    } else {
        val as Sample
    }
}

/// `clamp(round(sample * gain))`, rounding half away from zero.
#[inline(always)]
pub fn scale_saturating(sample: Sample, gain: f64) -> Sample {
    saturate32(libm::round(sample as f64 * gain))
}

/// Scale every sample in `samples` by `gain` with saturation.
pub fn block_scale(samples: &mut [Sample], gain: f64) {
    for s in samples.iter_mut() {
        *s = scale_saturating(*s, gain);
    }
}
