//! Aurora Synth - voices for the aurora instrument engine
//!
//! Two kinds of polyphony live here, both allocation-free once constructed:
//!
//! ## Saw synth
//!
//! - [`AdsrEnvelope`] / [`AdsrParams`] - linear ADSR gain envelope
//! - [`SawVoice`] - naive saw oscillator scaled by envelope and velocity
//! - [`SynthVoicePool`] - fixed voice pool with idle-first allocation and a
//!   round-robin steal cursor
//!
//! ```rust
//! use aurora_core::BlockBuffer;
//! use aurora_synth::SynthVoicePool;
//!
//! let mut pool: SynthVoicePool<8> = SynthVoicePool::new(48000.0);
//! pool.start_note(69, 1.0); // A4
//!
//! let mut buffer = BlockBuffer::new(2, 512);
//! pool.render_block(&mut buffer, 0, 512);
//! ```
//!
//! ## Drum-pad sampler
//!
//! - [`PadSample`] - immutable planar sample buffer, shared by `Arc`
//! - [`PadSampler`] - 8 pad slots + 8 one-shot playback voices with
//!   unconditional round-robin stealing
//!
//! The pad band (`PAD_NOTE_START` .. `PAD_NOTE_START + NUM_PADS`) is carved
//! out of the synth pool's range: [`SynthVoicePool::can_handle`] refuses
//! exactly the notes [`pad_for_note`] accepts.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! aurora-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod envelope;
pub mod sampler;
pub mod voice;

// Re-export main types at crate root
pub use envelope::{AdsrEnvelope, AdsrParams, EnvelopeStage};
pub use sampler::{
    DEFAULT_PAD_VELOCITY, NUM_PAD_VOICES, NUM_PADS, PAD_NOTE_START, PAD_SAMPLE_CAP_SECS,
    PadSample, PadSampler, pad_for_note,
};
pub use voice::{SawVoice, SynthVoicePool, midi_to_freq};
