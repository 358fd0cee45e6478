//! One-shot drum-pad sampler.
//!
//! Eight pad slots, each holding a decoded sample buffer, and a fixed pool
//! of playback cursors allocated round-robin. Pads map onto a contiguous
//! MIDI band starting at C1 (note 36).
//!
//! Sample buffers are shared as `Arc<PadSample>`: the load path builds a
//! buffer off-thread and the slot swap is a single pointer replacement. A
//! playback voice clones the slot's `Arc` when triggered, so a voice always
//! finishes against the buffer it started with, even if the slot is
//! replaced or cleared mid-playback.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use aurora_core::{BlockBuffer, NoteEvent, NoteKind};

/// Number of drum pads.
pub const NUM_PADS: usize = 8;

/// First MIDI note of the pad band (C1). Pads occupy
/// `PAD_NOTE_START .. PAD_NOTE_START + NUM_PADS`.
pub const PAD_NOTE_START: u8 = 36;

/// Number of simultaneous pad playback voices.
pub const NUM_PAD_VOICES: usize = 8;

/// Longest sample a pad will hold, in seconds. The load path truncates
/// anything longer to bound memory.
pub const PAD_SAMPLE_CAP_SECS: u32 = 30;

/// Velocity used when a pad is triggered from the UI rather than MIDI.
pub const DEFAULT_PAD_VELOCITY: f32 = 0.85;

/// Map a MIDI note to a pad index, if it falls inside the pad band.
#[inline]
pub fn pad_for_note(note: u8) -> Option<usize> {
    let index = note.checked_sub(PAD_NOTE_START)? as usize;
    (index < NUM_PADS).then_some(index)
}

/// An immutable, planar sample buffer owned by a pad slot.
///
/// Channel count and frame count are fixed at construction and never change
/// during playback.
#[derive(Debug, Clone)]
pub struct PadSample {
    channels: Vec<Vec<f32>>,
    frames: usize,
    sample_rate: u32,
}

impl PadSample {
    /// Build a sample from planar channel data.
    ///
    /// Channels are truncated to the shortest channel's length so every
    /// channel always holds the same number of frames. Empty input produces
    /// a zero-frame sample, which a trigger treats as already finished.
    pub fn new(mut channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        let frames = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        for channel in &mut channels {
            channel.truncate(frames);
        }
        Self {
            channels,
            frames,
            sample_rate,
        }
    }

    /// Build a mono sample.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(alloc::vec![samples], sample_rate)
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames per channel.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Source sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Borrow one channel's samples.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is out of range.
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }
}

/// One pad slot: an optional sample plus its display name.
#[derive(Debug, Clone, Default)]
struct PadSlot {
    sample: Option<Arc<PadSample>>,
    name: String,
}

/// A playback cursor over a pad's sample buffer.
#[derive(Debug, Clone, Default)]
struct PadVoice {
    source: Option<Arc<PadSample>>,
    position: usize,
    gain: f32,
}

impl PadVoice {
    fn is_playing(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|s| self.position < s.frames())
    }
}

/// The 8-pad one-shot sampler.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use aurora_core::BlockBuffer;
/// use aurora_synth::{PadSample, PadSampler};
///
/// let mut sampler = PadSampler::new();
/// let click = PadSample::from_mono(vec![1.0, -1.0, 0.5], 44100);
/// sampler.load(0, Arc::new(click), "click");
///
/// sampler.trigger(0, 1.0);
/// let mut buffer = BlockBuffer::new(2, 64);
/// sampler.process_block(&mut buffer, &[]);
/// assert!(buffer.channel(0)[0] != 0.0);
/// ```
#[derive(Debug, Default)]
pub struct PadSampler {
    pads: [PadSlot; NUM_PADS],
    voices: [PadVoice; NUM_PAD_VOICES],
    next_voice: usize,
}

impl PadSampler {
    /// Create a sampler with empty pads and idle voices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a decoded sample into a pad slot, replacing any prior sample.
    ///
    /// Returns `false` (leaving the slot untouched) when the index is out of
    /// range. Voices still playing the replaced buffer keep their own
    /// reference and finish undisturbed.
    pub fn load(&mut self, pad: usize, sample: Arc<PadSample>, name: &str) -> bool {
        let Some(slot) = self.pads.get_mut(pad) else {
            return false;
        };
        slot.sample = Some(sample);
        slot.name = String::from(name);
        true
    }

    /// Empty a pad slot. Out-of-range indices are ignored.
    pub fn clear(&mut self, pad: usize) {
        if let Some(slot) = self.pads.get_mut(pad) {
            slot.sample = None;
            slot.name.clear();
        }
    }

    /// True if the pad holds a sample.
    pub fn has_sample(&self, pad: usize) -> bool {
        self.pads.get(pad).is_some_and(|s| s.sample.is_some())
    }

    /// Display name of the pad's sample, if loaded.
    pub fn sample_name(&self, pad: usize) -> Option<&str> {
        self.pads
            .get(pad)
            .filter(|s| s.sample.is_some())
            .map(|s| s.name.as_str())
    }

    /// Fire a pad.
    ///
    /// No-op for empty slots and out-of-range indices. Allocation is
    /// unconditional round-robin: the next voice in the cycle is taken over
    /// whether or not it was still playing — an abrupt cut, by policy.
    pub fn trigger(&mut self, pad: usize, velocity: f32) {
        let Some(sample) = self.pads.get(pad).and_then(|s| s.sample.as_ref()) else {
            return;
        };
        let sample = Arc::clone(sample);

        let voice = &mut self.voices[self.next_voice];
        self.next_voice = (self.next_voice + 1) % NUM_PAD_VOICES;

        voice.source = Some(sample);
        voice.position = 0;
        voice.gain = velocity.clamp(0.0, 1.0);
    }

    /// Process one block: map pad-band note-ons to triggers, then mix every
    /// active voice additively into `buffer`.
    ///
    /// Triggers take effect from frame 0 of this block regardless of the
    /// event's in-block offset. Source channels are clamped to the sample's
    /// last channel, so mono sources play into every output channel.
    pub fn process_block(&mut self, buffer: &mut BlockBuffer, events: &[NoteEvent]) {
        for event in events {
            if event.kind == NoteKind::NoteOn {
                if let Some(pad) = pad_for_note(event.note) {
                    self.trigger(pad, event.velocity);
                }
            }
        }

        let frames = buffer.frames();
        let num_channels = buffer.num_channels();

        for voice in &mut self.voices {
            if !voice.is_playing() {
                continue;
            }
            let Some(source) = voice.source.as_ref() else {
                continue;
            };

            let remaining = source.frames() - voice.position;
            let to_render = remaining.min(frames);

            for channel in 0..num_channels {
                let source_channel = channel.min(source.num_channels() - 1);
                let src = &source.channel(source_channel)[voice.position..voice.position + to_render];
                let dst = &mut buffer.channel_mut(channel)[..to_render];
                for (out, sample) in dst.iter_mut().zip(src.iter()) {
                    *out += sample * voice.gain;
                }
            }

            voice.position += to_render;
            if voice.position >= source.frames() {
                voice.source = None;
                voice.position = 0;
            }
        }
    }

    /// Number of voices currently playing.
    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_playing()).count()
    }

    /// Stop all playback voices without touching the pad slots.
    pub fn reset_voices(&mut self) {
        for voice in &mut self.voices {
            voice.source = None;
            voice.position = 0;
        }
        self.next_voice = 0;
    }
}
