//! The master signal chain: lowpass → reverb → gain.
//!
//! Order is part of the instrument's sound and is fixed here, not
//! configurable. All three stages derive their settings from the current
//! parameter values once per block; there is no additional smoothing, so
//! fast automation may zipper slightly (accepted).

use aurora_core::{BlockBuffer, BlockEffect};
use aurora_effects::{LowPassFilter, Reverb, ReverbParams};

/// Lowpass cutoff bounds in Hz after the atmosphere attenuation.
const CUTOFF_MIN_HZ: f32 = 100.0;
const CUTOFF_MAX_HZ: f32 = 20000.0;

/// Butterworth Q for the chain's lowpass.
const CHAIN_Q: f32 = 0.707;

/// Stateful master chain applied in place to every rendered block.
#[derive(Debug)]
pub struct SignalChain {
    filter: LowPassFilter,
    reverb: Reverb,
    master_gain: f32,
}

impl SignalChain {
    /// Create the chain for the given sample rate. Call
    /// [`prepare`](Self::prepare) before processing.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = LowPassFilter::new(sample_rate);
        filter.set_q(CHAIN_Q);
        Self {
            filter,
            reverb: Reverb::new(sample_rate),
            master_gain: 1.0,
        }
    }

    /// Size both stages for the negotiated configuration.
    pub fn prepare(&mut self, sample_rate: f32, max_frames: usize, channels: usize) {
        self.filter.prepare(sample_rate, max_frames, channels);
        self.reverb.prepare(sample_rate, max_frames, channels);
    }

    /// Derive all stage settings from the current parameter values.
    ///
    /// The atmosphere macro closes the filter (down to half the base cutoff
    /// at full tilt), opens up the reverb, and is applied before
    /// [`process_block`](Self::process_block) each block.
    pub fn update(&mut self, base_cutoff_hz: f32, atmosphere: f32, master_volume: f32) {
        let cutoff = (base_cutoff_hz * (1.0 - atmosphere * 0.5)).clamp(CUTOFF_MIN_HZ, CUTOFF_MAX_HZ);
        self.filter.set_cutoff_hz(cutoff);

        self.reverb.set_parameters(ReverbParams {
            room_size: atmosphere * 0.85,
            wet_level: atmosphere * 0.45,
            dry_level: 1.0 - atmosphere * 0.25,
            damping: 0.5 + atmosphere * 0.3,
            width: 0.5 + atmosphere * 0.5,
            freeze: 0.0,
        });

        // Raw linear gain, no dB mapping
        self.master_gain = master_volume;
    }

    /// Apply filter → reverb → gain, in place, in that order.
    pub fn process_block(&mut self, buffer: &mut BlockBuffer) {
        self.filter.process_block(buffer);
        self.reverb.process_block(buffer);
        buffer.apply_gain(self.master_gain);
    }

    /// Clear all stage state (filter history, reverb tail).
    pub fn reset(&mut self) {
        self.filter.reset();
        self.reverb.reset();
    }

    /// The cutoff currently applied to the filter, in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz()
    }
}
