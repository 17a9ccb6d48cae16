//! Host run of the relay: simulated mic → passthrough task → simulated amp.
//!
//! Follows the same bring-up order as the target firmware:
//!
//! ```text
//!   I2sSession::open (fatal on error)
//!   amplifier out of shutdown, mic settle wait
//!   spawn "audio_passthrough" task ──► Passthrough::run() (never returns)
//! ```
//!
//! The endpoints are paced by a wall-clock sample clock, so the loop runs at
//! the real 48 kHz frame rate. Every few seconds the simulated RX reports a
//! DMA fault to exercise the skip-and-continue path.
//!
//! Log verbosity comes from `RUST_LOG` (default `info`; use
//! `RUST_LOG=AUDIO_PASSTHROUGH=debug` for per-frame byte counts).

mod sim;

use std::process;
use std::thread;

use i2s_relay::board::{settle_microphone, Max98357};
use i2s_relay::config::I2S_CONFIG;
use i2s_relay::constants::{LOG_TARGET, TASK_NAME, TASK_PRIORITY, TASK_STACK_BYTES};
use i2s_relay::control::AudioControl;
use i2s_relay::passthrough::Passthrough;
use i2s_relay::session::I2sSession;
use i2s_relay::transform::{ActiveTransform, Transform, ACTIVE_TRANSFORM};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use sim::{SimMic, SimPin, SimSpeaker, StdDelay};

/// Host threads format log lines on the audio task, which needs more room
/// than the target's task stack.
const HOST_STACK_SCALE: usize = 16;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_logging();

    let mut session = I2sSession::open(SimMic::new(), SimSpeaker::new(), I2S_CONFIG)
        .expect("I2S driver init");
    info!(target: LOG_TARGET, "I2S driver initialized successfully");

    let mut amp = Max98357::new(SimPin::new("SD_MODE")).expect("amplifier SD_MODE pin");
    amp.enable().expect("amplifier enable");
    settle_microphone(&mut StdDelay);

    let task = thread::Builder::new()
        .name(TASK_NAME.into())
        .stack_size(TASK_STACK_BYTES * HOST_STACK_SCALE)
        .spawn(move || {
            let mut relay =
                Passthrough::new(&mut session, ACTIVE_TRANSFORM).expect("session enabled");
            relay.run();
        })
        .expect("spawn passthrough task");
    info!(
        target: LOG_TARGET,
        "Audio passthrough task created ({}, priority {}, transform {})",
        TASK_NAME,
        TASK_PRIORITY,
        <ActiveTransform as Transform>::NAME,
    );

    // The task only comes back if it panicked.
    if task.join().is_err() {
        error!(target: LOG_TARGET, "Audio passthrough task died");
        process::exit(1);
    }
}
