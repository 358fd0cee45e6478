//! Note events.
//!
//! The host (or the engine's own injection queue) delivers one time-ordered
//! list of these per block. Events are transient: consumed once, never
//! stored across blocks.

/// What a note event does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteKind {
    /// Key pressed.
    NoteOn,
    /// Key released.
    NoteOff,
}

/// One MIDI-style note event with an in-block frame timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    /// MIDI note number (0-127).
    pub note: u8,
    /// Velocity, normalized to [0.0, 1.0].
    pub velocity: f32,
    /// On or off.
    pub kind: NoteKind,
    /// MIDI channel (informational; the engine is omni).
    pub channel: u8,
    /// Frame offset within the current block. Event lists are ordered by
    /// non-decreasing offset.
    pub offset: u32,
}

impl NoteEvent {
    /// A note-on at the given block offset.
    pub fn on(note: u8, velocity: f32, offset: u32) -> Self {
        Self {
            note,
            velocity: velocity.clamp(0.0, 1.0),
            kind: NoteKind::NoteOn,
            channel: 0,
            offset,
        }
    }

    /// A note-off at the given block offset.
    pub fn off(note: u8, offset: u32) -> Self {
        Self {
            note,
            velocity: 0.0,
            kind: NoteKind::NoteOff,
            channel: 0,
            offset,
        }
    }
}

/// Merge two offset-ordered event lists into `out`, preserving time order.
///
/// Stable: on equal offsets, events from `a` land before events from `b`.
/// `out` is cleared first; the caller pre-allocates its capacity, so on the
/// audio thread this does not allocate unless the combined event count
/// exceeds that capacity.
pub fn merge_events(a: &[NoteEvent], b: &[NoteEvent], out: &mut alloc::vec::Vec<NoteEvent>) {
    out.clear();
    let mut ia = 0;
    let mut ib = 0;
    while ia < a.len() && ib < b.len() {
        if b[ib].offset < a[ia].offset {
            out.push(b[ib]);
            ib += 1;
        } else {
            out.push(a[ia]);
            ia += 1;
        }
    }
    out.extend_from_slice(&a[ia..]);
    out.extend_from_slice(&b[ib..]);
}
