//! Aurora Core - DSP primitives for the aurora instrument engine
//!
//! Foundational building blocks for the real-time render path, designed for
//! zero allocation while audio is running.
//!
//! # Core Abstractions
//!
//! ## Block Processing
//!
//! - [`BlockBuffer`] - Planar multichannel audio block with additive writes
//! - [`BlockEffect`] - Object-safe trait for in-place block processors
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook lowpass response
//! - [`CombFilter`] - Damped feedback comb for reverb algorithms
//! - [`AllpassFilter`] - Schroeder allpass for reverb diffusion
//!
//! ## Events
//!
//! - [`NoteEvent`] / [`NoteKind`] - Time-stamped note on/off events
//! - [`merge_events`] - Stable, allocation-free merge of two event streams
//!
//! ## Utilities
//!
//! - [`flush_denormal`] - Denormal suppression for feedback paths
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! aurora-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in processing paths; everything is
//!   sized up front
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Object-safe traits**: dynamic dispatch where a host needs it, static
//!   dispatch everywhere else

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allpass;
pub mod biquad;
pub mod buffer;
pub mod comb;
pub mod effect;
pub mod event;
pub mod math;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use biquad::Biquad;
pub use buffer::BlockBuffer;
pub use comb::CombFilter;
pub use effect::BlockEffect;
pub use event::{NoteEvent, NoteKind, merge_events};
pub use math::flush_denormal;
