//! Aurora Effects - block effects for the aurora instrument
//!
//! The three processors behind the instrument's master section, all built on
//! aurora-core primitives and all in-place [`BlockEffect`]s:
//!
//! - [`LowPassFilter`] - RBJ lowpass, one biquad per channel
//! - [`Reverb`] - Freeverb-style stereo reverb with a room-model parameter
//!   surface ([`ReverbParams`])
//! - [`StereoWidener`] - mid/side width matrix, identity at width 1.0
//!
//! ## Example
//!
//! ```rust
//! use aurora_core::{BlockBuffer, BlockEffect};
//! use aurora_effects::{LowPassFilter, Reverb, StereoWidener};
//!
//! let mut filter = LowPassFilter::new(48000.0);
//! let mut reverb = Reverb::new(48000.0);
//! let mut width = StereoWidener::new();
//!
//! filter.prepare(48000.0, 512, 2);
//! reverb.prepare(48000.0, 512, 2);
//!
//! let mut buffer = BlockBuffer::new(2, 512);
//! width.process_block(&mut buffer);
//! filter.process_block(&mut buffer);
//! reverb.process_block(&mut buffer);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod filter;
pub mod reverb;
pub mod width;

// Re-export main types at crate root
pub use aurora_core::BlockEffect;
pub use filter::LowPassFilter;
pub use reverb::{Reverb, ReverbParams};
pub use width::StereoWidener;
