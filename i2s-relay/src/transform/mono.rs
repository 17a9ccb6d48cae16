//! Left-channel collapse, duplicated into both slots.
//!
//! Built for a mono microphone on the left slot feeding a stereo amplifier:
//! the right slot of the capture carries nothing useful.

use crate::constants::FRAME_PAIRS;
use crate::frame::{extract_left, interleave_lr, pairs_in, Frame, Sample};

use super::Transform;

/// Rewrites each captured pair `(L, R)` as `(L, L)`.
///
/// Only the pairs covered by the reported byte count are rewritten, so a
/// short read never duplicates samples left over from an earlier cycle. A
/// trailing half pair is left as captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonoDuplicate;

impl Transform for MonoDuplicate {
    const NAME: &'static str = "mono-duplicate";

    fn apply(&self, frame: &mut Frame, bytes_read: usize) {
        let pairs = pairs_in(bytes_read).min(FRAME_PAIRS);
        let mut mono: [Sample; FRAME_PAIRS] = [0; FRAME_PAIRS];

        extract_left(&frame[..pairs * 2], &mut mono[..pairs]);
        let mono = &mono[..pairs];
        interleave_lr(&mut frame[..pairs * 2], mono, mono);
    }
}
