//! Aurora IO - the pad-sample load path.
//!
//! Decodes WAV files into [`PadSample`](aurora_synth::PadSample) buffers for
//! the drum pads. Everything here runs on loader/UI threads — never on the
//! audio thread; the decoded buffer travels into the engine through its
//! command queue as an `Arc` handoff.
//!
//! ```rust,no_run
//! use aurora_io::read_pad_sample;
//!
//! let sample = read_pad_sample("kick.wav")?;
//! // hand it to EngineHandle::load_pad_sample(...)
//! # Ok::<(), aurora_io::Error>(())
//! ```

mod wav;

pub use wav::{WavInfo, read_pad_sample, read_wav_info, write_wav};

/// Error type for sample loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error (missing file, corrupt header, bad data).
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file decoded to zero audio frames.
    #[error("sample contains no audio frames")]
    EmptySample,
}

/// Convenience result type for sample loading.
pub type Result<T> = std::result::Result<T, Error>;
