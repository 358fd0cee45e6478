//! Property-based tests for the DSP primitives.
//!
//! Verifies the fundamental invariants every primitive must hold: finite
//! output for any in-range input, and bounded behavior over long runs.

use aurora_core::{AllpassFilter, Biquad, CombFilter};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Lowpass output must be finite for any cutoff/Q in the usable range
    /// and any input block in [-1, 1].
    #[test]
    fn biquad_lowpass_finite(
        cutoff in 100.0f32..20000.0,
        q in 0.5f32..2.0,
        input in prop::collection::vec(-1.0f32..=1.0, 1..256),
    ) {
        let mut biquad = Biquad::new();
        biquad.set_lowpass(cutoff, q, 44100.0);
        for &x in &input {
            let y = biquad.process(x);
            prop_assert!(y.is_finite());
        }
    }

    /// A comb filter with legal feedback must not blow up: output for a
    /// bounded input stays bounded over many periods of the delay length.
    #[test]
    fn comb_bounded(
        delay in 1usize..2000,
        feedback in 0.0f32..=0.99,
        damp in 0.0f32..=1.0,
    ) {
        let mut comb = CombFilter::new(delay);
        comb.set_feedback(feedback);
        comb.set_damp(damp);

        let mut peak = 0.0f32;
        for n in 0..delay * 20 {
            let x = if n < delay { 1.0 } else { 0.0 };
            let y = comb.process(x);
            prop_assert!(y.is_finite());
            peak = peak.max(y.abs());
        }
        // Geometric series bound: 1 / (1 - feedback), with headroom
        prop_assert!(peak <= 1.0 / (1.0 - feedback) + 1.0);
    }

    /// Allpass output is finite and the ring clears completely.
    #[test]
    fn allpass_finite_and_clearable(
        delay in 1usize..1000,
        input in prop::collection::vec(-1.0f32..=1.0, 1..128),
    ) {
        let mut ap = AllpassFilter::new(delay);
        for &x in &input {
            prop_assert!(ap.process(x).is_finite());
        }
        ap.clear();
        prop_assert_eq!(ap.process(0.0), 0.0);
    }
}
