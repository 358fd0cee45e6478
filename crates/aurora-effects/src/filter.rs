//! Lowpass filter over a planar block.

use alloc::vec::Vec;
use aurora_core::{Biquad, BlockBuffer, BlockEffect};

/// Butterworth Q: flattest passband, no resonant bump.
const DEFAULT_Q: f32 = 0.707;

/// Multichannel lowpass filter, one biquad per channel.
///
/// The channel count is fixed at [`prepare`](BlockEffect::prepare) time;
/// retuning happens via [`set_cutoff_hz`](Self::set_cutoff_hz) and is cheap
/// enough to call every block (the instrument's chain does exactly that).
///
/// # Example
///
/// ```rust
/// use aurora_core::{BlockBuffer, BlockEffect};
/// use aurora_effects::LowPassFilter;
///
/// let mut filter = LowPassFilter::new(48000.0);
/// filter.prepare(48000.0, 512, 2);
/// filter.set_cutoff_hz(2500.0);
///
/// let mut buffer = BlockBuffer::new(2, 512);
/// filter.process_block(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    biquads: Vec<Biquad>,
    cutoff_hz: f32,
    q: f32,
    sample_rate: f32,
}

impl LowPassFilter {
    /// Create a filter with a wide-open cutoff. Call `prepare` before use.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            biquads: Vec::new(),
            cutoff_hz: 20000.0,
            q: DEFAULT_Q,
            sample_rate,
        }
    }

    /// Set the cutoff frequency in Hz and retune every channel.
    ///
    /// The value is clamped below Nyquist; retuning keeps filter state so
    /// per-block cutoff sweeps do not click.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        let clamped = cutoff_hz.clamp(10.0, self.sample_rate * 0.49);
        if (clamped - self.cutoff_hz).abs() < 0.01 {
            return;
        }
        self.cutoff_hz = clamped;
        self.retune();
    }

    /// Current cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Set the Q factor.
    pub fn set_q(&mut self, q: f32) {
        self.q = q.clamp(0.1, 20.0);
        self.retune();
    }

    fn retune(&mut self) {
        for biquad in &mut self.biquads {
            biquad.set_lowpass(self.cutoff_hz, self.q, self.sample_rate);
        }
    }
}

impl BlockEffect for LowPassFilter {
    fn prepare(&mut self, sample_rate: f32, _max_frames: usize, channels: usize) {
        self.sample_rate = sample_rate;
        self.cutoff_hz = self.cutoff_hz.min(sample_rate * 0.49);
        self.biquads = (0..channels).map(|_| Biquad::new()).collect();
        self.retune();
    }

    fn process_block(&mut self, buffer: &mut BlockBuffer) {
        let channels = buffer.num_channels().min(self.biquads.len());
        for channel in 0..channels {
            let biquad = &mut self.biquads[channel];
            for sample in buffer.channel_mut(channel).iter_mut() {
                *sample = biquad.process(*sample);
            }
        }
    }

    fn reset(&mut self) {
        for biquad in &mut self.biquads {
            biquad.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    fn sine_block(freq: f32, sample_rate: f32, channels: usize, frames: usize) -> BlockBuffer {
        let mut buffer = BlockBuffer::new(channels, frames);
        for frame in 0..frames {
            let value = libm::sinf(2.0 * PI * freq * frame as f32 / sample_rate);
            for channel in 0..channels {
                buffer.add_sample(channel, frame, value);
            }
        }
        buffer
    }

    #[test]
    fn passes_low_frequencies() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, 4800, 1);
        filter.set_cutoff_hz(5000.0);

        let mut buffer = sine_block(100.0, 48000.0, 1, 4800);
        filter.process_block(&mut buffer);

        let peak = buffer.peak();
        assert!(peak > 0.9, "100 Hz should pass a 5 kHz lowpass, peak {}", peak);
    }

    #[test]
    fn attenuates_high_frequencies() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, 4800, 1);
        filter.set_cutoff_hz(500.0);

        let mut buffer = sine_block(15000.0, 48000.0, 1, 4800);
        filter.process_block(&mut buffer);

        // Ignore the initial transient
        let tail_peak = buffer.channel(0)[2400..]
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(tail_peak < 0.01, "15 kHz should be crushed, peak {}", tail_peak);
    }

    #[test]
    fn channels_filtered_independently() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, 256, 2);
        filter.set_cutoff_hz(1000.0);

        let mut buffer = BlockBuffer::new(2, 256);
        for frame in 0..256 {
            buffer.add_sample(0, frame, 1.0);
            // channel 1 stays silent
        }
        filter.process_block(&mut buffer);

        assert!(buffer.channel(0).iter().any(|s| *s != 0.0));
        assert!(buffer.channel(1).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn reset_clears_state() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, 64, 1);
        filter.set_cutoff_hz(200.0);

        let mut buffer = BlockBuffer::new(1, 64);
        for frame in 0..64 {
            buffer.add_sample(0, frame, 1.0);
        }
        filter.process_block(&mut buffer);

        filter.reset();
        let mut silent = BlockBuffer::new(1, 64);
        filter.process_block(&mut silent);
        assert_eq!(silent.peak(), 0.0);
    }

    #[test]
    fn extra_buffer_channels_pass_through() {
        let mut filter = LowPassFilter::new(48000.0);
        filter.prepare(48000.0, 16, 1); // prepared mono

        let mut buffer = BlockBuffer::new(2, 16);
        buffer.add_sample(1, 0, 0.5);
        filter.process_block(&mut buffer);
        // Unprepared channel is left alone rather than indexed out of range
        assert_eq!(buffer.sample(1, 0), 0.5);
    }
}
