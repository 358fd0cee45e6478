//! Damped feedback comb filter for reverb algorithms.
//!
//! The feedback path runs through a one-pole lowpass (damping), simulating
//! high-frequency absorption in real rooms. Reverb tunings are integral
//! sample counts, so the delay is a plain ring buffer.

use crate::flush_denormal;
use alloc::vec;
use alloc::vec::Vec;

/// Comb filter with feedback and damping.
///
/// # Example
///
/// ```rust
/// use aurora_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// comb.set_feedback(0.84);
/// comb.set_damp(0.2);
///
/// let out = comb.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
    feedback: f32,
    damp1: f32,
    damp2: f32,
    filter_store: f32,
}

impl CombFilter {
    /// Create a comb filter with the given delay length in samples.
    ///
    /// A length of zero is bumped to one so the ring stays valid.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            index: 0,
            feedback: 0.5,
            damp1: 0.5,
            damp2: 0.5,
            filter_store: 0.0,
        }
    }

    /// Set the feedback amount. Clamped to [0.0, 0.99] for stability.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// Current feedback amount.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the damping amount (0.0 = bright, 1.0 = dark).
    #[inline]
    pub fn set_damp(&mut self, damp: f32) {
        self.damp1 = damp.clamp(0.0, 1.0);
        self.damp2 = 1.0 - self.damp1;
    }

    /// Current damping amount.
    #[inline]
    pub fn damp(&self) -> f32 {
        self.damp1
    }

    /// Process one sample: emit the delayed signal, refill the ring with
    /// input plus damped feedback.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.index];

        // One-pole lowpass in the feedback path
        self.filter_store = flush_denormal(output * self.damp2 + self.filter_store * self.damp1);

        self.buffer[self.index] = input + self.filter_store * self.feedback;
        self.index += 1;
        if self.index >= self.buffer.len() {
            self.index = 0;
        }

        output
    }

    /// Clear the ring and the damping state.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.filter_store = 0.0;
    }

    /// Delay length in samples.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if the delay length is zero (never, by construction).
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
