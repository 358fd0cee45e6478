//! ADSR envelope generator.
//!
//! Linear attack-decay-sustain-release gain envelope, one per synth voice.
//! Durations are in seconds; the sustain level is a ratio. Each stage ramps
//! at a constant per-sample step so the configured durations are exact to
//! within one sample.

/// ADSR envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Envelope is inactive — output is zero. Terminal and reusable.
    #[default]
    Idle,
    /// Output ramps up toward 1.0.
    Attack,
    /// Output falls from 1.0 toward the sustain level.
    Decay,
    /// Output holds at the sustain level while the gate is held.
    Sustain,
    /// Output ramps to zero after the gate is released.
    Release,
}

/// Envelope timing parameters.
///
/// Defaults match the instrument's stock synth timbre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdsrParams {
    /// Attack time in seconds.
    pub attack_secs: f32,
    /// Decay time in seconds.
    pub decay_secs: f32,
    /// Sustain level, 0.0 to 1.0.
    pub sustain_level: f32,
    /// Release time in seconds.
    pub release_secs: f32,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack_secs: 0.05,
            decay_secs: 0.2,
            sustain_level: 0.7,
            release_secs: 0.3,
        }
    }
}

/// Linear ADSR envelope generator.
///
/// # Example
///
/// ```rust
/// use aurora_synth::AdsrEnvelope;
///
/// let mut env = AdsrEnvelope::new(48000.0);
/// env.gate_on();
/// for _ in 0..1000 {
///     let gain = env.advance();
///     // scale the voice output by `gain`
/// }
/// env.gate_off();
/// ```
///
/// The sample rate must be set before first use. Changing it while the
/// envelope is active leaves the in-flight stage at the old rate; call
/// [`reset`](Self::reset) after a rate change.
#[derive(Debug, Clone)]
pub struct AdsrEnvelope {
    stage: EnvelopeStage,
    level: f32,
    sample_rate: f32,
    params: AdsrParams,

    // Per-sample steps, derived from params and sample rate
    attack_step: f32,
    decay_step: f32,
    // Fixed at gate-off so release always takes `release_secs` from the
    // level held at that moment
    release_step: f32,
}

impl AdsrEnvelope {
    /// Create an idle envelope with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            stage: EnvelopeStage::Idle,
            level: 0.0,
            sample_rate,
            params: AdsrParams::default(),
            attack_step: 0.0,
            decay_step: 0.0,
            release_step: 0.0,
        };
        env.recalculate_steps();
        env
    }

    /// Replace all timing parameters at once.
    pub fn set_parameters(&mut self, params: AdsrParams) {
        self.params = AdsrParams {
            attack_secs: params.attack_secs.max(0.0),
            decay_secs: params.decay_secs.max(0.0),
            sustain_level: params.sustain_level.clamp(0.0, 1.0),
            release_secs: params.release_secs.max(0.0),
        };
        self.recalculate_steps();
    }

    /// Current timing parameters.
    pub fn parameters(&self) -> AdsrParams {
        self.params
    }

    /// Set the sample rate. Reset the envelope afterwards if it was active.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_steps();
    }

    /// Open the gate: enter Attack from the current level.
    ///
    /// The level is deliberately not zeroed, so retriggering a tail that is
    /// still sounding ramps up from where it is instead of clicking.
    pub fn gate_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    /// Close the gate: enter Release from whatever level is held.
    ///
    /// A no-op when idle. The release slope is computed here so the fall to
    /// zero takes `release_secs` from the current level.
    pub fn gate_off(&mut self) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }
        if self.level <= 0.0 {
            self.stage = EnvelopeStage::Idle;
            return;
        }
        self.release_step = self.level / samples(self.params.release_secs, self.sample_rate);
        self.stage = EnvelopeStage::Release;
    }

    /// Force the envelope idle at zero level immediately (hard cut).
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
    }

    /// Current stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Current level without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// False only when idle.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    /// Advance one sample and return the current gain.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += self.attack_step;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                self.level -= self.decay_step;
                if self.level <= self.params.sustain_level {
                    self.level = self.params.sustain_level;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.params.sustain_level;
            }

            EnvelopeStage::Release => {
                self.level -= self.release_step;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    fn recalculate_steps(&mut self) {
        self.attack_step = 1.0 / samples(self.params.attack_secs, self.sample_rate);
        self.decay_step =
            (1.0 - self.params.sustain_level) / samples(self.params.decay_secs, self.sample_rate);
    }
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

/// Duration in samples, floored at one so zero-length stages complete in a
/// single step instead of dividing by zero.
#[inline]
fn samples(secs: f32, sample_rate: f32) -> f32 {
    (secs * sample_rate).max(1.0)
}
