//! Host-automatable parameters.
//!
//! The UI or host automation writes, the audio thread reads — no locks, no
//! allocation. Values live in bit-cast `AtomicU32`s; the engine loads each
//! one once at the start of every block.

use std::sync::atomic::{AtomicU32, Ordering};

/// A thread-safe float parameter with range clamping.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicU32,
    min: f32,
    max: f32,
    default: f32,
}

impl AtomicParam {
    /// Create a parameter with a default value and range.
    pub fn new(default: f32, min: f32, max: f32) -> Self {
        Self {
            value: AtomicU32::new(default.to_bits()),
            min,
            max,
            default,
        }
    }

    /// Set the value (UI/automation thread). Clamped to the range.
    #[inline]
    pub fn set(&self, value: f32) {
        let clamped = value.clamp(self.min, self.max);
        self.value.store(clamped.to_bits(), Ordering::Release);
    }

    /// Get the value (audio thread).
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Minimum of the range.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Maximum of the range.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Default value.
    pub fn default_value(&self) -> f32 {
        self.default
    }

    /// Reset to the default value.
    pub fn reset(&self) {
        self.set(self.default);
    }
}

/// Parameter id of the master output gain.
pub const MASTER_VOLUME: &str = "master_volume";
/// Parameter id of the lowpass base cutoff in Hz.
pub const LOWPASS_CUTOFF: &str = "lowpass_cutoff";
/// Parameter id of the atmosphere macro.
pub const ATMOSPHERE: &str = "atmosphere";
/// Parameter id of the synth mix level.
pub const SYNTH_LEVEL: &str = "synth_level";

/// All parameter ids, in declaration order.
pub const PARAM_IDS: [&str; 4] = [MASTER_VOLUME, LOWPASS_CUTOFF, ATMOSPHERE, SYNTH_LEVEL];

/// The instrument's four controls.
///
/// Addressable by string id for generic hosts and persistence, with typed
/// accessors for the audio thread.
///
/// | id               | range         | default |
/// |------------------|---------------|---------|
/// | `master_volume`  | [0, 1]        | 0.8     |
/// | `lowpass_cutoff` | [100, 20000]  | 5000    |
/// | `atmosphere`     | [0, 1]        | 0.3     |
/// | `synth_level`    | [0, 1]        | 0.5     |
#[derive(Debug)]
pub struct EngineParams {
    master_volume: AtomicParam,
    lowpass_cutoff: AtomicParam,
    atmosphere: AtomicParam,
    synth_level: AtomicParam,
}

impl EngineParams {
    /// Create the parameter set at default values.
    pub fn new() -> Self {
        Self {
            master_volume: AtomicParam::new(0.8, 0.0, 1.0),
            lowpass_cutoff: AtomicParam::new(5000.0, 100.0, 20000.0),
            atmosphere: AtomicParam::new(0.3, 0.0, 1.0),
            synth_level: AtomicParam::new(0.5, 0.0, 1.0),
        }
    }

    /// Look up a parameter by id.
    pub fn param(&self, id: &str) -> Option<&AtomicParam> {
        match id {
            MASTER_VOLUME => Some(&self.master_volume),
            LOWPASS_CUTOFF => Some(&self.lowpass_cutoff),
            ATMOSPHERE => Some(&self.atmosphere),
            SYNTH_LEVEL => Some(&self.synth_level),
            _ => None,
        }
    }

    /// Read a parameter by id.
    pub fn get(&self, id: &str) -> Option<f32> {
        self.param(id).map(AtomicParam::get)
    }

    /// Write a parameter by id. Returns false for unknown ids.
    pub fn set(&self, id: &str, value: f32) -> bool {
        match self.param(id) {
            Some(param) => {
                param.set(value);
                true
            }
            None => false,
        }
    }

    /// Master output gain, linear [0, 1].
    #[inline]
    pub fn master_volume(&self) -> f32 {
        self.master_volume.get()
    }

    /// Lowpass base cutoff in Hz.
    #[inline]
    pub fn lowpass_cutoff(&self) -> f32 {
        self.lowpass_cutoff.get()
    }

    /// Atmosphere macro [0, 1].
    #[inline]
    pub fn atmosphere(&self) -> f32 {
        self.atmosphere.get()
    }

    /// Synth mix level [0, 1].
    #[inline]
    pub fn synth_level(&self) -> f32 {
        self.synth_level.get()
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self::new()
    }
}
