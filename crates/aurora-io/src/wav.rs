//! WAV decode into pad buffers.

use crate::{Error, Result};
use aurora_synth::{PAD_SAMPLE_CAP_SECS, PadSample};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // across all channels
    let num_frames = total_samples / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
    })
}

/// Decode a WAV file into a planar [`PadSample`].
///
/// PCM integer samples are normalized to [-1.0, 1.0]; float samples pass
/// through. Files longer than [`PAD_SAMPLE_CAP_SECS`] are truncated to that
/// cap (at the file's own sample rate) to bound pad memory. A file that
/// decodes to zero frames is an error — there is nothing to trigger.
pub fn read_pad_sample<P: AsRef<Path>>(path: P) -> Result<PadSample> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_channels = usize::from(spec.channels.max(1));

    let total_frames = reader.len() as usize / num_channels;
    let cap_frames = spec.sample_rate as usize * PAD_SAMPLE_CAP_SECS as usize;
    let frames = total_frames.min(cap_frames);
    if frames == 0 {
        return Err(Error::EmptySample);
    }
    if total_frames > cap_frames {
        tracing::warn!(
            path = %path.display(),
            total_frames,
            cap_frames,
            "sample exceeds the pad cap; truncating"
        );
    }

    let mut channels: Vec<Vec<f32>> = (0..num_channels)
        .map(|_| Vec::with_capacity(frames))
        .collect();

    let wanted = frames * num_channels;
    match spec.sample_format {
        SampleFormat::Float => {
            for (index, sample) in reader.into_samples::<f32>().take(wanted).enumerate() {
                channels[index % num_channels].push(sample?);
            }
        }
        SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            for (index, sample) in reader.into_samples::<i32>().take(wanted).enumerate() {
                channels[index % num_channels].push(sample? as f32 * scale);
            }
        }
    }

    Ok(PadSample::new(channels, spec.sample_rate))
}

/// Write a [`PadSample`] to a 32-bit float WAV file.
///
/// The inverse of [`read_pad_sample`]; used for fixtures and offline
/// rendering.
pub fn write_wav<P: AsRef<Path>>(path: P, sample: &PadSample) -> Result<()> {
    let spec = hound::WavSpec {
        channels: sample.num_channels() as u16,
        sample_rate: sample.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for frame in 0..sample.frames() {
        for channel in 0..sample.num_channels() {
            writer.write_sample(sample.channel(channel)[frame])?;
        }
    }
    writer.finalize()?;
    Ok(())
}
