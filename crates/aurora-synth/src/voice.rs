//! Polyphonic saw synth voices.
//!
//! Each voice is a free-running naive saw oscillator scaled by its ADSR
//! envelope and note velocity. Voices live in a fixed pool owned by the
//! audio thread; the pool never allocates after construction.

use crate::envelope::{AdsrEnvelope, AdsrParams};
use crate::sampler::{NUM_PADS, PAD_NOTE_START};
use aurora_core::BlockBuffer;

/// Fixed gain applied to every synth voice so several voices can sum
/// without clipping.
const VOICE_HEADROOM: f32 = 0.3;

/// Convert a MIDI note number to frequency in Hz (A4 = 69 = 440 Hz).
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (note as f32 - 69.0) / 12.0)
}

/// One unit of synth polyphony: naive saw oscillator + ADSR envelope.
///
/// The saw is the instrument's single timbre: `2*phase - 1`, phase in
/// [0, 1). The phase free-runs while the voice is active and is not reset on
/// note start, so consecutive notes pick up wherever the ramp left off.
#[derive(Debug, Clone)]
pub struct SawVoice {
    phase: f32,
    phase_inc: f32,
    freq_hz: f32,
    velocity_gain: f32,
    note: u8,
    envelope: AdsrEnvelope,
    active: bool,
    sample_rate: f32,
}

impl SawVoice {
    /// Create an inactive voice.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            freq_hz: 440.0,
            velocity_gain: 0.0,
            note: 0,
            envelope: AdsrEnvelope::new(sample_rate),
            active: false,
            sample_rate,
        }
    }

    /// Update the sample rate. Call before audio starts.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase_inc = self.freq_hz / sample_rate;
        self.envelope.set_sample_rate(sample_rate);
    }

    /// Start a note: set pitch and velocity, open the envelope gate.
    pub fn start_note(&mut self, note: u8, velocity: f32, adsr: AdsrParams) {
        self.note = note;
        self.freq_hz = midi_to_freq(note);
        self.phase_inc = self.freq_hz / self.sample_rate;
        self.velocity_gain = velocity.clamp(0.0, 1.0);
        self.envelope.set_parameters(adsr);
        self.envelope.gate_on();
        self.active = true;
    }

    /// Stop the note.
    ///
    /// With `tail_off` the envelope runs its Release stage and the voice
    /// frees itself when it finishes; without, the voice is silenced on the
    /// spot (hard cut, no click suppression).
    pub fn stop_note(&mut self, tail_off: bool) {
        if tail_off {
            self.envelope.gate_off();
        } else {
            self.envelope.reset();
            self.active = false;
        }
    }

    /// True while the voice produces sound (envelope not idle).
    pub fn is_active(&self) -> bool {
        self.active && self.envelope.is_active()
    }

    /// The note this voice is (or last was) playing.
    pub fn note(&self) -> u8 {
        self.note
    }

    /// Current oscillator phase in [0, 1). Exposed for verification.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Render `frames` samples additively into every channel of `buffer`,
    /// starting at frame `start`.
    ///
    /// Frees the voice if the envelope went idle during the block.
    pub fn render(&mut self, buffer: &mut BlockBuffer, start: usize, frames: usize) {
        if !self.envelope.is_active() {
            return;
        }

        let num_channels = buffer.num_channels();
        for frame in start..start + frames {
            let gain = self.envelope.advance() * self.velocity_gain * VOICE_HEADROOM;
            let sample = (2.0 * self.phase - 1.0) * gain;

            for channel in 0..num_channels {
                buffer.add_sample(channel, frame, sample);
            }

            self.phase += self.phase_inc;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }

        if !self.envelope.is_active() {
            self.active = false;
        }
    }
}

/// Fixed pool of [`SawVoice`]s with idle-first allocation and a round-robin
/// steal cursor.
///
/// The pool answers every note except the drum-pad band (`PAD_NOTE_START`
/// through `PAD_NOTE_START + NUM_PADS - 1`), which belongs to the sampler.
/// When all `N` voices are busy, the next note steals a voice; the steal
/// cursor advances modulo `N` on every steal so repeated overflow cycles the
/// whole pool deterministically.
#[derive(Debug)]
pub struct SynthVoicePool<const N: usize> {
    voices: [SawVoice; N],
    steal_cursor: usize,
    adsr: AdsrParams,
}

impl<const N: usize> SynthVoicePool<N> {
    /// Create a pool of `N` idle voices.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: core::array::from_fn(|_| SawVoice::new(sample_rate)),
            steal_cursor: 0,
            adsr: AdsrParams::default(),
        }
    }

    /// Update the sample rate on every voice. Call before audio starts.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// True for every note outside the reserved drum-pad band.
    pub fn can_handle(note: u8) -> bool {
        !(PAD_NOTE_START..PAD_NOTE_START + NUM_PADS as u8).contains(&note)
    }

    /// Set the envelope parameters used by subsequent notes.
    pub fn set_adsr(&mut self, params: AdsrParams) {
        self.adsr = params;
    }

    /// Current envelope parameters.
    pub fn adsr(&self) -> AdsrParams {
        self.adsr
    }

    /// Start a note on an idle voice, stealing one when the pool is full.
    ///
    /// Notes in the pad band are ignored — they belong to the sampler.
    pub fn start_note(&mut self, note: u8, velocity: f32) {
        if !Self::can_handle(note) {
            return;
        }
        let index = self.allocate_voice();
        self.voices[index].start_note(note, velocity, self.adsr);
    }

    /// Stop every voice playing `note`.
    pub fn stop_note(&mut self, note: u8, tail_off: bool) {
        for voice in &mut self.voices {
            if voice.is_active() && voice.note() == note {
                voice.stop_note(tail_off);
            }
        }
    }

    /// Stop every voice.
    pub fn all_notes_off(&mut self, tail_off: bool) {
        for voice in &mut self.voices {
            voice.stop_note(tail_off);
        }
    }

    /// Render all active voices additively into `buffer`.
    pub fn render_block(&mut self, buffer: &mut BlockBuffer, start: usize, frames: usize) {
        for voice in &mut self.voices {
            voice.render(buffer, start, frames);
        }
    }

    /// Number of voices currently sounding.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Read access to the voices, for inspection.
    pub fn voices(&self) -> &[SawVoice; N] {
        &self.voices
    }

    fn allocate_voice(&mut self) -> usize {
        for (index, voice) in self.voices.iter().enumerate() {
            if !voice.is_active() {
                return index;
            }
        }

        // Pool saturated: steal, cursor always advancing
        let index = self.steal_cursor;
        self.steal_cursor = (self.steal_cursor + 1) % N;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    #[test]
    fn midi_to_freq_reference_points() {
        assert!((midi_to_freq(69) - 440.0).abs() < 0.01);
        assert!((midi_to_freq(60) - 261.63).abs() < 0.1);
        assert!((midi_to_freq(81) - 880.0).abs() < 0.02);
    }

    #[test]
    fn pad_band_is_refused() {
        for note in PAD_NOTE_START..PAD_NOTE_START + NUM_PADS as u8 {
            assert!(!SynthVoicePool::<8>::can_handle(note));
        }
        assert!(SynthVoicePool::<8>::can_handle(PAD_NOTE_START - 1));
        assert!(SynthVoicePool::<8>::can_handle(PAD_NOTE_START + NUM_PADS as u8));
        assert!(SynthVoicePool::<8>::can_handle(69));
    }

    #[test]
    fn started_note_renders_nonsilent() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(69, 1.0);

        let mut buffer = BlockBuffer::new(2, 512);
        pool.render_block(&mut buffer, 0, 512);
        assert!(buffer.peak() > 0.0, "note should be audible");
    }

    #[test]
    fn zero_velocity_note_is_silent() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(69, 0.0);

        let mut buffer = BlockBuffer::new(2, 512);
        pool.render_block(&mut buffer, 0, 512);
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn hard_stop_silences_immediately() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(69, 1.0);

        let mut buffer = BlockBuffer::new(2, 512);
        pool.render_block(&mut buffer, 0, 512);

        pool.stop_note(69, false);
        assert_eq!(pool.active_voice_count(), 0);

        buffer.clear();
        pool.render_block(&mut buffer, 0, 512);
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn tail_off_keeps_voice_alive_through_release() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(69, 1.0);

        let mut buffer = BlockBuffer::new(2, 512);
        pool.render_block(&mut buffer, 0, 512);

        pool.stop_note(69, true);
        assert_eq!(pool.active_voice_count(), 1, "release tail still sounding");

        // Default release is 0.3 s; render past it and the voice frees itself
        let blocks = (0.4 * SR / 512.0) as usize;
        for _ in 0..blocks {
            buffer.clear();
            pool.render_block(&mut buffer, 0, 512);
        }
        assert_eq!(pool.active_voice_count(), 0);
    }

    #[test]
    fn a4_phase_advance_and_headroom() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(69, 1.0);

        let mut buffer = BlockBuffer::new(2, 512);
        pool.render_block(&mut buffer, 0, 512);

        // 512 frames at 440 Hz / 44100 Hz ≈ 5.108 cycles
        let expected = (512.0 * 440.0 / SR).fract();
        let phase = pool.voices()[0].phase();
        assert!(
            (phase - expected).abs() < 1e-3,
            "phase {} expected {}",
            phase,
            expected
        );

        // Attack (50 ms) has not completed in 512 frames, so the peak sits
        // below the full headroom-scaled amplitude
        assert!(buffer.peak() <= VOICE_HEADROOM + 1e-6);
    }

    #[test]
    fn output_is_written_to_all_channels() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(60, 1.0);

        let mut buffer = BlockBuffer::new(2, 256);
        pool.render_block(&mut buffer, 0, 256);
        assert_eq!(buffer.channel(0), buffer.channel(1));
        assert!(buffer.peak() > 0.0);
    }

    #[test]
    fn pool_prefers_idle_voices() {
        let mut pool: SynthVoicePool<4> = SynthVoicePool::new(SR);
        pool.start_note(60, 1.0);
        pool.start_note(64, 1.0);
        pool.start_note(67, 1.0);
        assert_eq!(pool.active_voice_count(), 3);
    }

    #[test]
    fn saturated_pool_steals_deterministically() {
        let mut pool: SynthVoicePool<2> = SynthVoicePool::new(SR);
        pool.start_note(60, 1.0);
        pool.start_note(62, 1.0);
        assert_eq!(pool.active_voice_count(), 2);

        // Third note steals voice 0, fourth steals voice 1
        pool.start_note(64, 1.0);
        assert_eq!(pool.active_voice_count(), 2);
        assert_eq!(pool.voices()[0].note(), 64);

        pool.start_note(65, 1.0);
        assert_eq!(pool.voices()[1].note(), 65);
    }

    #[test]
    fn all_notes_off_clears_pool() {
        let mut pool: SynthVoicePool<8> = SynthVoicePool::new(SR);
        pool.start_note(60, 1.0);
        pool.start_note(64, 1.0);
        pool.start_note(67, 1.0);
        pool.all_notes_off(false);
        assert_eq!(pool.active_voice_count(), 0);
    }
}
