//! Aurora Engine - the real-time render core of the aurora instrument
//!
//! One [`Engine`] per plugin instance. The host thread drives
//! [`Engine::render_block`] with a planar [`BlockBuffer`] and a time-ordered
//! [`NoteEvent`] list; UI and loader threads talk to the running engine
//! through a cloneable [`EngineHandle`].
//!
//! Per block, the engine:
//!
//! 1. zeroes output channels beyond the host's input channel count,
//! 2. merges injected note events into the host stream in time order,
//! 3. renders the 8-voice saw synth and scales it by `synth_level`,
//! 4. mixes the drum-pad sampler in at unity,
//! 5. widens the stereo image by the atmosphere macro,
//! 6. applies the master chain: lowpass → reverb → master gain.
//!
//! ```rust
//! use aurora_core::{BlockBuffer, NoteEvent};
//! use aurora_engine::Engine;
//!
//! let (mut engine, handle) = Engine::new();
//! engine.prepare(48000.0, 512, 0, 2);
//!
//! handle.params().set("atmosphere", 0.6);
//!
//! let mut buffer = BlockBuffer::new(2, 512);
//! engine.render_block(&mut buffer, &[NoteEvent::on(69, 1.0, 0)]);
//! ```

pub mod chain;
pub mod engine;
pub mod params;

// Re-export main types at crate root
pub use aurora_core::{BlockBuffer, NoteEvent, NoteKind};
pub use aurora_synth::{AdsrParams, DEFAULT_PAD_VELOCITY, NUM_PADS, PadSample};
pub use chain::SignalChain;
pub use engine::{Engine, EngineHandle, NUM_SYNTH_VOICES};
pub use params::{
    ATMOSPHERE, AtomicParam, EngineParams, LOWPASS_CUTOFF, MASTER_VOLUME, PARAM_IDS, SYNTH_LEVEL,
};
