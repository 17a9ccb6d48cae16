//! The capture → transform → emit loop.
//!
//! [`Passthrough`] borrows an enabled [`I2sSession`] for its whole life and
//! owns the one frame buffer every cycle reuses. Each [`cycle()`](Passthrough::cycle)
//! walks three stages in strict order:
//!
//! ```text
//!  AwaitingInput ──read ok──► Processing ──► Emitting ──┐
//!       ▲   │                      │                    │
//!       │   │                      └──0 bytes read──────┤
//!       │   └──read fault (logged, cycle dropped)       │
//!       └──────────── write ok / write fault (logged) ──┘
//! ```
//!
//! A read that delivers zero bytes completes the cycle straight from
//! Processing; nothing is written.
//!
//! Both transfers block with [`Timeout::Forever`], so the loop is paced by
//! the sample clock: one frame in, one frame out, per frame period. There is
//! no overlap between cycles and nothing is buffered across them. The
//! transform and the write only ever see the bytes the read actually
//! delivered in the same cycle.
//!
//! [`run()`](Passthrough::run) never returns. The relay has no shutdown path.

use core::fmt;

use log::{debug, error, info};

use crate::constants::LOG_TARGET;
use crate::control::AudioControl;
use crate::error::{CycleError, SetupError};
use crate::frame::{Frame, FRAME_SAMPLES};
use crate::session::{I2sRx, I2sSession, I2sTx, Timeout};
use crate::transform::Transform;


/// Timeout used for both transfers in steady state.
pub const TRANSFER_TIMEOUT: Timeout = Timeout::Forever;

/// Bytes moved by one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Running counters since the loop was created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// Cycles that got through both transfers.
    pub cycles: u64,
    pub read_faults: u64,
    pub write_faults: u64,
    /// Writes that accepted fewer bytes than were read.
    pub short_writes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// Passthrough loop bound to one session and one transform.
pub struct Passthrough<'s, Rx, Tx, T> {
    session: &'s mut I2sSession<Rx, Tx>,
    transform: T,
    frame: Frame,
    stats: RelayStats,
}

impl<'s, Rx, Tx, E, T> Passthrough<'s, Rx, Tx, T>
where
    Rx: I2sRx<Error = E>,
    Tx: I2sTx<Error = E>,
    E: fmt::Debug + fmt::Display,
    T: Transform,
{
    /// Bind the loop to an enabled session.
    pub fn new(session: &'s mut I2sSession<Rx, Tx>, transform: T) -> Result<Self, SetupError<E>> {
        if !session.is_enabled() {
            return Err(SetupError::Disabled);
        }
        Ok(Passthrough {
            session,
            transform,
            frame: [0; FRAME_SAMPLES],
            stats: RelayStats::default(),
        })
    }

    /// Run one read → transform → write cycle.
    ///
    /// A fault on either transfer is logged and counted, and the rest of the
    /// cycle is dropped. It is returned for the caller's information only;
    /// the loop itself is ready for the next cycle either way.
    pub fn cycle(&mut self) -> Result<CycleReport, CycleError<E>> {
        let bytes_read = match self.session.read(&mut self.frame, TRANSFER_TIMEOUT) {
            Ok(n) => n,
            Err(e) => {
                let err = CycleError::Read(e);
                error!(target: LOG_TARGET, "{}", err);
                self.stats.read_faults += 1;
                return Err(err);
            }
        };
        self.stats.bytes_read += bytes_read as u64;

        self.transform.apply(&mut self.frame, bytes_read);

        if bytes_read == 0 {
            debug!(target: LOG_TARGET, "Read 0 bytes, nothing to write");
            self.stats.cycles += 1;
            return Ok(CycleReport {
                bytes_read: 0,
                bytes_written: 0,
            });
        }

        let bytes_written = match self.session.write(&self.frame, bytes_read, TRANSFER_TIMEOUT) {
            Ok(n) => n,
            Err(e) => {
                let err = CycleError::Write(e);
                error!(target: LOG_TARGET, "{}", err);
                self.stats.write_faults += 1;
                return Err(err);
            }
        };
        self.stats.bytes_written += bytes_written as u64;
        if bytes_written < bytes_read {
            self.stats.short_writes += 1;
        }
        self.stats.cycles += 1;

        debug!(target: LOG_TARGET, "Read {} bytes, wrote {} bytes", bytes_read, bytes_written);

        Ok(CycleReport {
            bytes_read,
            bytes_written,
        })
    }

    /// Cycle forever. Faults never end the loop.
    pub fn run(&mut self) -> ! {
        info!(target: LOG_TARGET, "Audio passthrough task started ({})", T::NAME);
        loop {
            let _ = self.cycle();
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// The frame buffer as left by the last cycle.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The transform applied every cycle.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub fn session(&self) -> &I2sSession<Rx, Tx> {
        &*self.session
    }
}
