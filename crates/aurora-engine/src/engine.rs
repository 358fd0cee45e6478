//! The render orchestrator.
//!
//! [`Engine`] owns every piece of audio-thread state: the synth voice pool,
//! the pad sampler, the stereo widener and the master signal chain. The host
//! calls [`Engine::render_block`] from its real-time callback; everything
//! else — sample loads, pad triggers, on-screen keyboard notes — arrives
//! from other threads through the [`EngineHandle`] command queue and is
//! drained at the start of each block.
//!
//! Nothing on the render path allocates, blocks, or touches a lock. Loads
//! build their buffers off-thread and hand them over as `Arc`s; the slot
//! swap inside the sampler is a plain pointer replacement.

use std::sync::Arc;

use aurora_core::{BlockBuffer, NoteEvent, NoteKind, merge_events};
use aurora_effects::{BlockEffect, StereoWidener};
use aurora_synth::{AdsrParams, NUM_PADS, PadSample, PadSampler, SynthVoicePool};
use crossbeam_channel::{Receiver, Sender, bounded};

use crate::chain::SignalChain;
use crate::params::EngineParams;

/// Synth polyphony.
pub const NUM_SYNTH_VOICES: usize = 8;

/// Commands the handle may enqueue between blocks.
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Pre-sized capacity of the per-block merged event list. The host rarely
/// delivers more events than frames; past this the merge falls back to
/// growing the vector (audible-state-safe, but allocating).
const EVENT_CAPACITY: usize = 1024;

/// A command shipped from a non-real-time thread to the audio thread.
enum EngineCommand {
    LoadPad {
        pad: usize,
        sample: Arc<PadSample>,
        name: String,
    },
    ClearPad {
        pad: usize,
    },
    TriggerPad {
        pad: usize,
        velocity: f32,
    },
    Note(NoteEvent),
}

/// Cloneable, thread-safe front door to a running [`Engine`].
///
/// All methods are fire-and-forget: they enqueue a command the audio thread
/// applies at the start of its next block. When the queue is full (the UI
/// outran the audio thread by more than the queue capacity) the command is
/// dropped with a warning rather than blocking.
#[derive(Clone)]
pub struct EngineHandle {
    sender: Sender<EngineCommand>,
    params: Arc<EngineParams>,
}

impl EngineHandle {
    /// Ship a decoded sample into a pad slot.
    ///
    /// Returns `false` without side effects when the pad index is out of
    /// range or the engine is gone.
    pub fn load_pad_sample(&self, pad: usize, sample: PadSample, name: &str) -> bool {
        if pad >= NUM_PADS {
            return false;
        }
        self.send(EngineCommand::LoadPad {
            pad,
            sample: Arc::new(sample),
            name: String::from(name),
        })
    }

    /// Empty a pad slot.
    pub fn clear_pad_sample(&self, pad: usize) {
        self.send(EngineCommand::ClearPad { pad });
    }

    /// Fire a pad from the UI.
    pub fn trigger_pad(&self, pad: usize, velocity: f32) {
        self.send(EngineCommand::TriggerPad { pad, velocity });
    }

    /// Inject a note event (e.g. from the on-screen keyboard). It is merged
    /// into the next block's event stream in time order.
    pub fn inject_note(&self, event: NoteEvent) {
        self.send(EngineCommand::Note(event));
    }

    /// The shared parameter store.
    pub fn params(&self) -> &Arc<EngineParams> {
        &self.params
    }

    fn send(&self, command: EngineCommand) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!("engine command queue full or closed; command dropped");
                false
            }
        }
    }
}

/// The polyphonic instrument's real-time core.
pub struct Engine {
    synth: SynthVoicePool<NUM_SYNTH_VOICES>,
    sampler: PadSampler,
    widener: StereoWidener,
    chain: SignalChain,
    params: Arc<EngineParams>,

    commands: Receiver<EngineCommand>,

    // Per-block scratch, sized in prepare
    injected: Vec<NoteEvent>,
    merged: Vec<NoteEvent>,

    sample_rate: f32,
    max_frames: usize,
    input_channels: usize,
    prepared: bool,
}

impl Engine {
    /// Create an engine and its cross-thread handle.
    pub fn new() -> (Self, EngineHandle) {
        let (sender, commands) = bounded(COMMAND_QUEUE_CAPACITY);
        let params = Arc::new(EngineParams::new());
        let handle = EngineHandle {
            sender,
            params: Arc::clone(&params),
        };

        let sample_rate = 44100.0;
        let engine = Self {
            synth: SynthVoicePool::new(sample_rate),
            sampler: PadSampler::new(),
            widener: StereoWidener::new(),
            chain: SignalChain::new(sample_rate),
            params,
            commands,
            injected: Vec::new(),
            merged: Vec::new(),
            sample_rate,
            max_frames: 0,
            input_channels: 0,
            prepared: false,
        };
        (engine, handle)
    }

    /// Size everything for the host's negotiated configuration.
    ///
    /// Must be called before the first [`render_block`](Self::render_block)
    /// and again after any change of sample rate, maximum block size, or
    /// channel layout. `input_channels` is how many channels of the block
    /// buffer carry host input; channels beyond that are zeroed at the top
    /// of every block.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_frames: usize,
        input_channels: usize,
        output_channels: usize,
    ) {
        tracing::debug!(
            sample_rate,
            max_frames,
            input_channels,
            output_channels,
            "preparing engine"
        );

        self.sample_rate = sample_rate;
        self.max_frames = max_frames;
        self.input_channels = input_channels;

        self.synth.set_sample_rate(sample_rate);
        self.synth.all_notes_off(false);
        self.sampler.reset_voices();
        self.chain.prepare(sample_rate, max_frames, output_channels);

        self.injected = Vec::with_capacity(COMMAND_QUEUE_CAPACITY);
        self.merged = Vec::with_capacity(EVENT_CAPACITY);

        self.prepared = true;
    }

    /// Drop playback state and mark the engine unprepared. Pads stay loaded.
    pub fn release(&mut self) {
        tracing::debug!("releasing engine");
        self.synth.all_notes_off(false);
        self.sampler.reset_voices();
        self.chain.reset();
        self.prepared = false;
    }

    /// Render one block.
    ///
    /// `events` is the host's time-ordered note list for this block. The
    /// call always fills the buffer — silence at worst — and never panics
    /// mid-block.
    pub fn render_block(&mut self, buffer: &mut BlockBuffer, events: &[NoteEvent]) {
        if !self.prepared {
            buffer.clear();
            return;
        }
        debug_assert!(
            buffer.frames() <= self.max_frames,
            "block exceeds the prepared maximum"
        );

        // Zero output channels the host provides no input for
        for channel in self.input_channels..buffer.num_channels() {
            buffer.clear_channel(channel);
        }

        // Parameters are read once per block
        let master_volume = self.params.master_volume();
        let base_cutoff = self.params.lowpass_cutoff();
        let atmosphere = self.params.atmosphere();
        let synth_level = self.params.synth_level();

        // Apply queued commands, collecting injected notes
        self.drain_commands();

        // Merge host and injected events, preserving time order
        merge_events(events, &self.injected, &mut self.merged);

        // All event-to-voice assignment happens before any rendering
        for event in &self.merged {
            if !SynthVoicePool::<NUM_SYNTH_VOICES>::can_handle(event.note) {
                continue; // pad band: the sampler scans the list itself
            }
            match event.kind {
                NoteKind::NoteOn => self.synth.start_note(event.note, event.velocity),
                NoteKind::NoteOff => self.synth.stop_note(event.note, true),
            }
        }

        let frames = buffer.frames();

        // Synth first, then scale the whole buffer by its level. Valid only
        // because nothing else has been mixed in yet; anything ordered ahead
        // of the sampler must keep this invariant.
        self.synth.render_block(buffer, 0, frames);
        buffer.apply_gain(synth_level);

        // Pads mix in at unity
        self.sampler.process_block(buffer, &self.merged);

        // Atmosphere-driven stereo width
        if buffer.num_channels() >= 2 {
            self.widener.set_width(1.0 + atmosphere * 1.2);
            self.widener.process_block(buffer);
        }

        // Master chain: filter -> reverb -> gain, retuned from this block's
        // parameter values
        self.chain.update(base_cutoff, atmosphere, master_volume);
        self.chain.process_block(buffer);
    }

    /// Set the envelope used by subsequent synth notes.
    pub fn set_adsr(&mut self, params: AdsrParams) {
        self.synth.set_adsr(params);
    }

    /// True if the pad holds a sample (persistence surface).
    pub fn pad_has_sample(&self, pad: usize) -> bool {
        self.sampler.has_sample(pad)
    }

    /// Name of the pad's sample, if loaded (persistence surface).
    pub fn pad_sample_name(&self, pad: usize) -> Option<&str> {
        self.sampler.sample_name(pad)
    }

    /// The shared parameter store.
    pub fn params(&self) -> &Arc<EngineParams> {
        &self.params
    }

    /// The sample rate the engine was last prepared at.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of synth voices currently sounding.
    pub fn active_synth_voices(&self) -> usize {
        self.synth.active_voice_count()
    }

    /// Number of pad voices currently playing.
    pub fn active_pad_voices(&self) -> usize {
        self.sampler.active_voice_count()
    }

    fn drain_commands(&mut self) {
        self.injected.clear();
        while let Ok(command) = self.commands.try_recv() {
            match command {
                EngineCommand::LoadPad { pad, sample, name } => {
                    self.sampler.load(pad, sample, &name);
                }
                EngineCommand::ClearPad { pad } => self.sampler.clear(pad),
                EngineCommand::TriggerPad { pad, velocity } => {
                    self.sampler.trigger(pad, velocity);
                }
                EngineCommand::Note(event) => self.injected.push(event),
            }
        }
    }
}
