//! # i2s-relay
//!
//! A `no_std`, zero-allocation real-time audio relay: stereo 32-bit PCM is
//! captured from an I²S microphone, run through one compile-time-selected
//! transform, and written straight back out to an I²S amplifier, one
//! fixed-size frame at a time, paced by the sample clock.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Parameters | [`constants`] / [`config`] | Compile-time rate, widths, pins, typed I²S config |
//! | Buffers | [`frame`] | Interleaved stereo frame layout and byte/sample math |
//! | Peripheral | [`session`] / [`control`] | Blocking RX/TX driver traits, owned endpoint pair |
//! | DSP | [`dsp`] / [`transform`] | Saturating gain, left-channel duplicate |
//! | Loop | [`passthrough`] | Read → transform → write, forever |
//! | Board | [`board`] | Amplifier shutdown pin, mic settle delay (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use i2s_relay::config::I2S_CONFIG;
//! use i2s_relay::passthrough::Passthrough;
//! use i2s_relay::session::I2sSession;
//! use i2s_relay::transform::ACTIVE_TRANSFORM;
//!
//! // At startup: any failure here is fatal.
//! let mut session = I2sSession::open(rx, tx, I2S_CONFIG).expect("I2S init");
//!
//! // On the dedicated audio task:
//! let mut relay = Passthrough::new(&mut session, ACTIVE_TRANSFORM).expect("relay");
//! relay.run();
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `max98357` | yes | [`board`]: amplifier SD_MODE pin and mic settle wait (requires `embedded-hal`) |
//! | `mono-duplicate` | no | Compile the left-channel duplicate transform instead of saturating gain |
//!
//! ## Audio parameters
//!
//! - **Frame size:** 64 stereo pairs ([`constants::FRAME_PAIRS`])
//! - **Sample rate:** 48 000 Hz ([`constants::SAMPLE_RATE_HZ`])
//! - **Sample format:** `i32` (signed 32-bit)
//! - **DMA descriptors:** 2 ([`constants::DMA_DESC_NUM`])

#![no_std]

pub mod constants;
pub mod config;
pub mod error;
pub mod frame;
pub mod control;
pub mod session;
pub mod dsp;
pub mod transform;
pub mod passthrough;

#[cfg(feature = "max98357")]
pub mod board;

#[cfg(test)]
mod testing;
