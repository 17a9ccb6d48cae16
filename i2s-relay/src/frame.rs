//! Interleaved stereo frame layout and channel helpers.
//!
//! A frame is `FRAME_PAIRS` stereo pairs of 32-bit samples stored as
//! `[L0, R0, L1, R1, ...]`, which is the layout the I²S DMA engine reads and
//! writes in Philips stereo mode. Transfer sizes are reported by the driver
//! in bytes, so the byte/sample conversions live here too.

use crate::constants::FRAME_PAIRS;

/// One channel's amplitude at one instant.
pub type Sample = i32;

/// Bytes per sample.
pub const SAMPLE_BYTES: usize = core::mem::size_of::<Sample>();

/// Bytes per stereo pair.
pub const PAIR_BYTES: usize = SAMPLE_BYTES * 2;

/// Samples per frame (both channels).
pub const FRAME_SAMPLES: usize = FRAME_PAIRS * 2;

/// Capacity of one frame in bytes.
pub const FRAME_BYTES: usize = FRAME_SAMPLES * SAMPLE_BYTES;

/// Fixed-capacity interleaved stereo buffer.
pub type Frame = [Sample; FRAME_SAMPLES];

/// Number of whole samples contained in `bytes`.
#[inline]
pub const fn samples_in(bytes: usize) -> usize {
    bytes / SAMPLE_BYTES
}

/// Number of whole stereo pairs contained in `bytes`.
#[inline]
pub const fn pairs_in(bytes: usize) -> usize {
    bytes / PAIR_BYTES
}

/// Byte length of an interleaved sample slice.
#[inline]
pub const fn byte_len(samples: &[Sample]) -> usize {
    samples.len() * SAMPLE_BYTES
}

/// Copy the left channel of an interleaved buffer into `left`.
///
/// Copies `left.len()` pairs.
///
/// # Panics
///
/// Debug-asserts that `src` holds at least `left.len()` pairs.
pub fn extract_left(src: &[Sample], left: &mut [Sample]) {
    debug_assert!(src.len() >= left.len() * 2);

    for (dst, pair) in left.iter_mut().zip(src.chunks_exact(2)) {
        *dst = pair[0];
    }
}

/// Interleave separate left and right channels into `dest`.
///
/// Writes `left.len()` pairs.
///
/// # Panics
///
/// Debug-asserts that both channels have the same length and that `dest`
/// has room for them.
pub fn interleave_lr(dest: &mut [Sample], left: &[Sample], right: &[Sample]) {
    debug_assert_eq!(left.len(), right.len());
    debug_assert!(dest.len() >= left.len() * 2);

    for (pair, (&l, &r)) in dest.chunks_exact_mut(2).zip(left.iter().zip(right)) {
        pair[0] = l;
        pair[1] = r;
    }
}

/// Fill a region of a frame with silence.
pub fn silence(dest: &mut [Sample]) {
    dest.fill(0);
}
