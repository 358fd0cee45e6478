//! Core block-effect trait.
//!
//! All processors in the instrument's signal chain implement [`BlockEffect`]:
//! in-place processing of one [`BlockBuffer`] per host callback. The trait is
//! object-safe, but the chain itself uses static dispatch — its order is part
//! of the instrument's contract, not a runtime configuration.

use crate::BlockBuffer;

/// An in-place audio block processor.
///
/// # Real-time contract
///
/// `process_block` runs on the audio thread: no allocation, no locking, no
/// I/O. Anything that needs memory is sized in [`prepare`](Self::prepare),
/// which runs before audio starts (and again whenever the sample rate or
/// channel layout changes).
///
/// # Example
///
/// ```rust
/// use aurora_core::{BlockBuffer, BlockEffect};
///
/// struct Inverter;
///
/// impl BlockEffect for Inverter {
///     fn prepare(&mut self, _sample_rate: f32, _max_frames: usize, _channels: usize) {}
///
///     fn process_block(&mut self, buffer: &mut BlockBuffer) {
///         buffer.apply_gain(-1.0);
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait BlockEffect {
    /// Size internal state for the given configuration.
    ///
    /// Must be called before the first `process_block` and after any change
    /// of sample rate, maximum block size, or channel count.
    fn prepare(&mut self, sample_rate: f32, max_frames: usize, channels: usize);

    /// Process one block in place.
    fn process_block(&mut self, buffer: &mut BlockBuffer);

    /// Clear internal state (delay lines, filter history) without changing
    /// parameters. Called when playback stops to prevent stale tails.
    fn reset(&mut self);
}
