//! Property-based tests for the master-section effects.
//!
//! Every effect must produce finite, bounded output for any legal parameter
//! setting, and the widener must be an exact identity at width 1.

use aurora_core::{BlockBuffer, BlockEffect};
use aurora_effects::{LowPassFilter, Reverb, ReverbParams, StereoWidener};
use proptest::prelude::*;

fn block_from(left: &[f32], right: &[f32]) -> BlockBuffer {
    let mut buffer = BlockBuffer::new(2, left.len());
    for frame in 0..left.len() {
        buffer.add_sample(0, frame, left[frame]);
        buffer.add_sample(1, frame, right[frame]);
    }
    buffer
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn filter_output_finite(
        cutoff in 100.0f32..20000.0,
        input in prop::collection::vec(-1.0f32..=1.0, 64..256),
    ) {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, input.len(), 2);
        filter.set_cutoff_hz(cutoff);

        let mut buffer = block_from(&input, &input);
        filter.process_block(&mut buffer);
        prop_assert!(buffer.peak().is_finite());
        // Butterworth lowpass of a bounded signal stays near bounds
        prop_assert!(buffer.peak() < 4.0);
    }

    #[test]
    fn reverb_output_finite(
        room in 0.0f32..=1.0,
        damping in 0.0f32..=1.0,
        wet in 0.0f32..=1.0,
        dry in 0.0f32..=1.0,
        width in 0.0f32..=1.0,
        input in prop::collection::vec(-1.0f32..=1.0, 64..256),
    ) {
        let mut reverb = Reverb::new(48000.0);
        reverb.set_parameters(ReverbParams {
            room_size: room,
            damping,
            wet_level: wet,
            dry_level: dry,
            width,
            freeze: 0.0,
        });

        let mut buffer = block_from(&input, &input);
        for _ in 0..4 {
            reverb.process_block(&mut buffer);
            prop_assert!(buffer.peak().is_finite());
        }
    }

    #[test]
    fn widener_identity_at_unit_width(
        left in prop::collection::vec(-1.0f32..=1.0, 1..128),
        right in prop::collection::vec(-1.0f32..=1.0, 1..128),
    ) {
        let frames = left.len().min(right.len());
        let (left, right) = (&left[..frames], &right[..frames]);

        let mut widener = StereoWidener::new();
        widener.set_width(1.0);

        let mut buffer = block_from(left, right);
        widener.process_block(&mut buffer);

        for frame in 0..frames {
            prop_assert_eq!(buffer.sample(0, frame), left[frame]);
            prop_assert_eq!(buffer.sample(1, frame), right[frame]);
        }
    }

    #[test]
    fn widener_bounded_across_range(
        width in 1.0f32..=2.2,
        left in prop::collection::vec(-1.0f32..=1.0, 32..64),
    ) {
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let mut widener = StereoWidener::new();
        widener.set_width(width);

        let mut buffer = block_from(&left, &right);
        widener.process_block(&mut buffer);

        // |L'| <= mid + side <= 1/w + (1 - 1/w) + ... bounded by 2 for |in| <= 1
        prop_assert!(buffer.peak() <= 2.0);
        prop_assert!(buffer.peak().is_finite());
    }
}
