//! Biquad (bi-quadratic) filter.
//!
//! Second-order IIR filter in transposed direct form II. The coefficient
//! setter implements the RBJ Audio EQ Cookbook lowpass response, which is the
//! only shape the instrument's signal chain needs.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Second-order IIR filter, transposed direct form II.
///
/// ```text
/// y[n]  = b0*x[n] + s1
/// s1    = b1*x[n] - a1*y[n] + s2
/// s2    = b2*x[n] - a2*y[n]
/// ```
///
/// Two state variables instead of four, and the structure is well behaved
/// for time-varying coefficients (the chain retunes it every block).
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    s1: f32,
    s2: f32,
}

impl Biquad {
    /// Create a biquad with passthrough coefficients (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Retune as an RBJ cookbook lowpass.
    ///
    /// Coefficients are normalized by `a0` on the way in. State is kept, so
    /// retuning while audio runs does not click.
    ///
    /// # Arguments
    ///
    /// * `cutoff_hz` - Cutoff frequency in Hz (caller clamps into a sane range)
    /// * `q` - Q factor, 0.707 for a Butterworth response
    /// * `sample_rate` - Sample rate in Hz
    pub fn set_lowpass(&mut self, cutoff_hz: f32, q: f32, sample_rate: f32) {
        let omega = 2.0 * PI * cutoff_hz / sample_rate;
        let cos_omega = cosf(omega);
        let alpha = sinf(omega) / (2.0 * q);

        let a0_inv = 1.0 / (1.0 + alpha);
        self.b0 = (1.0 - cos_omega) * 0.5 * a0_inv;
        self.b1 = (1.0 - cos_omega) * a0_inv;
        self.b2 = self.b0;
        self.a1 = -2.0 * cos_omega * a0_inv;
        self.a2 = (1.0 - alpha) * a0_inv;
    }

    /// Process a single sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.s1;
        self.s1 = self.b1 * input - self.a1 * output + self.s2;
        self.s2 = self.b2 * input - self.a2 * output;
        output
    }

    /// Clear the filter state without touching the coefficients.
    pub fn clear(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
