//! Algorithmic stereo reverb.
//!
//! Freeverb topology: eight parallel damped combs into four series allpasses
//! per channel, with the right channel's delay lengths offset by a fixed
//! spread for decorrelation. The parameter surface is the room-model set the
//! instrument's signal chain recomputes every block: room size, damping, wet
//! and dry levels, stereo width, freeze.

use aurora_core::{AllpassFilter, BlockBuffer, BlockEffect, CombFilter};

/// Freeverb comb delay lengths (samples at the 44.1 kHz reference rate).
/// Mutually prime to avoid coincident resonances.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass delay lengths (samples at the 44.1 kHz reference rate).
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Right-channel delay offset in samples, for stereo decorrelation.
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for the tuning constants.
const REFERENCE_RATE: f32 = 44100.0;

/// Input attenuation into the comb bank.
const INPUT_GAIN: f32 = 0.015;

/// Wet output make-up gain.
const WET_SCALE: f32 = 3.0;

/// Dry output make-up gain.
const DRY_SCALE: f32 = 2.0;

/// Scale a delay length from the reference rate to the target rate.
fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    let scaled = samples as f32 * target_rate / REFERENCE_RATE;
    (libm::roundf(scaled) as usize).max(1)
}

/// Room-model parameters, all in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Room size: larger rooms ring longer.
    pub room_size: f32,
    /// High-frequency absorption in the tail (0 = bright, 1 = dark).
    pub damping: f32,
    /// Level of the reverberated signal.
    pub wet_level: f32,
    /// Level of the untouched input.
    pub dry_level: f32,
    /// Stereo width of the tail (0 = mono tail, 1 = full spread).
    pub width: f32,
    /// Above 0.5 the tail recirculates forever and new input is muted.
    pub freeze: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            room_size: 0.5,
            damping: 0.5,
            wet_level: 0.33,
            dry_level: 0.4,
            width: 1.0,
            freeze: 0.0,
        }
    }
}

/// Freeverb-style stereo reverb.
///
/// Mono buffers run a single comb/allpass bank; stereo buffers run both,
/// sharing the mono sum of the input. Channels past the first two are left
/// dry. Parameters are plain per-block sets — the chain recomputes them from
/// the atmosphere macro on every block, so there is no internal smoothing.
///
/// # Example
///
/// ```rust
/// use aurora_core::{BlockBuffer, BlockEffect};
/// use aurora_effects::{Reverb, ReverbParams};
///
/// let mut reverb = Reverb::new(48000.0);
/// reverb.prepare(48000.0, 512, 2);
/// reverb.set_parameters(ReverbParams {
///     room_size: 0.8,
///     wet_level: 0.4,
///     ..ReverbParams::default()
/// });
///
/// let mut buffer = BlockBuffer::new(2, 512);
/// reverb.process_block(&mut buffer);
/// ```
#[derive(Debug)]
pub struct Reverb {
    combs_left: [CombFilter; 8],
    combs_right: [CombFilter; 8],
    allpasses_left: [AllpassFilter; 4],
    allpasses_right: [AllpassFilter; 4],

    params: ReverbParams,
    sample_rate: f32,

    // Derived per set_parameters
    input_gain: f32,
    wet1: f32,
    wet2: f32,
    dry: f32,
}

impl Reverb {
    /// Create a reverb tuned for the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            combs_left: core::array::from_fn(|i| {
                CombFilter::new(scale_to_rate(COMB_TUNINGS_44K[i], sample_rate))
            }),
            combs_right: core::array::from_fn(|i| {
                CombFilter::new(scale_to_rate(COMB_TUNINGS_44K[i] + STEREO_SPREAD, sample_rate))
            }),
            allpasses_left: core::array::from_fn(|i| {
                AllpassFilter::new(scale_to_rate(ALLPASS_TUNINGS_44K[i], sample_rate))
            }),
            allpasses_right: core::array::from_fn(|i| {
                AllpassFilter::new(scale_to_rate(ALLPASS_TUNINGS_44K[i] + STEREO_SPREAD, sample_rate))
            }),
            params: ReverbParams::default(),
            sample_rate,
            input_gain: INPUT_GAIN,
            wet1: 0.0,
            wet2: 0.0,
            dry: 0.0,
        };
        reverb.apply_parameters();
        reverb
    }

    /// Replace all parameters at once. Values are clamped to [0.0, 1.0].
    pub fn set_parameters(&mut self, params: ReverbParams) {
        let clamped = ReverbParams {
            room_size: params.room_size.clamp(0.0, 1.0),
            damping: params.damping.clamp(0.0, 1.0),
            wet_level: params.wet_level.clamp(0.0, 1.0),
            dry_level: params.dry_level.clamp(0.0, 1.0),
            width: params.width.clamp(0.0, 1.0),
            freeze: params.freeze.clamp(0.0, 1.0),
        };
        if clamped == self.params {
            return;
        }
        self.params = clamped;
        self.apply_parameters();
    }

    /// Current parameters.
    pub fn parameters(&self) -> ReverbParams {
        self.params
    }

    fn apply_parameters(&mut self) {
        // Freeze: infinite tail, input muted
        let (feedback, damp) = if self.params.freeze >= 0.5 {
            self.input_gain = 0.0;
            (1.0, 0.0)
        } else {
            self.input_gain = INPUT_GAIN;
            (self.params.room_size * 0.28 + 0.7, self.params.damping * 0.4)
        };

        for comb in self.combs_left.iter_mut().chain(self.combs_right.iter_mut()) {
            comb.set_feedback(feedback);
            comb.set_damp(damp);
        }

        let wet = self.params.wet_level * WET_SCALE;
        self.wet1 = wet * (self.params.width / 2.0 + 0.5);
        self.wet2 = wet * ((1.0 - self.params.width) / 2.0);
        self.dry = self.params.dry_level * DRY_SCALE;
    }
}

impl BlockEffect for Reverb {
    fn prepare(&mut self, sample_rate: f32, _max_frames: usize, _channels: usize) {
        if (sample_rate - self.sample_rate).abs() > f32::EPSILON {
            // Retuning the delay lengths means rebuilding the rings
            let params = self.params;
            *self = Reverb::new(sample_rate);
            self.params = params;
            self.apply_parameters();
            return;
        }
        self.reset();
    }

    fn process_block(&mut self, buffer: &mut BlockBuffer) {
        if buffer.num_channels() >= 2 {
            let frames = buffer.frames();
            let (left, right) = buffer.stereo_pair_mut();

            for frame in 0..frames {
                let dry_l = left[frame];
                let dry_r = right[frame];
                let input = (dry_l + dry_r) * self.input_gain;

                let mut out_l = 0.0;
                for comb in &mut self.combs_left {
                    out_l += comb.process(input);
                }
                let mut out_r = 0.0;
                for comb in &mut self.combs_right {
                    out_r += comb.process(input);
                }

                for allpass in &mut self.allpasses_left {
                    out_l = allpass.process(out_l);
                }
                for allpass in &mut self.allpasses_right {
                    out_r = allpass.process(out_r);
                }

                left[frame] = out_l * self.wet1 + out_r * self.wet2 + dry_l * self.dry;
                right[frame] = out_r * self.wet1 + out_l * self.wet2 + dry_r * self.dry;
            }
        } else if buffer.num_channels() == 1 {
            for sample in buffer.channel_mut(0).iter_mut() {
                let dry = *sample;
                let input = dry * self.input_gain;

                let mut out = 0.0;
                for comb in &mut self.combs_left {
                    out += comb.process(input);
                }
                for allpass in &mut self.allpasses_left {
                    out = allpass.process(out);
                }

                *sample = out * (self.wet1 + self.wet2) + dry * self.dry;
            }
        }
    }

    fn reset(&mut self) {
        for comb in self.combs_left.iter_mut().chain(self.combs_right.iter_mut()) {
            comb.clear();
        }
        for allpass in self
            .allpasses_left
            .iter_mut()
            .chain(self.allpasses_right.iter_mut())
        {
            allpass.clear();
        }
    }
}
