//! Mid/side stereo widener.

use aurora_core::{BlockBuffer, BlockEffect};

/// Stereo widener built on a mid-attenuation mid/side matrix.
///
/// For width `w`, the per-frame transform is
///
/// ```text
/// mid  = 0.5 * (1 + 1/w)
/// side = 0.5 * (1 - 1/w)
/// L' = mid * L - side * R
/// R' = mid * R - side * L
/// ```
///
/// which scales the mid signal by `1/w` while leaving the side signal
/// untouched. At `w = 1` this is the identity (mid 1, side 0). The matrix is
/// linear and roughly level-preserving but deliberately not
/// energy-normalized.
///
/// Stateless: buffers with fewer than two channels pass through untouched,
/// and only the first two channels take part in the transform.
#[derive(Debug, Clone)]
pub struct StereoWidener {
    width: f32,
}

impl StereoWidener {
    /// Create a widener at the identity width of 1.0.
    pub fn new() -> Self {
        Self { width: 1.0 }
    }

    /// Set the width factor. Values are floored just above zero to keep the
    /// `1/w` term finite; the instrument drives this in [1.0, 2.2].
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.01);
    }

    /// Current width factor.
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StereoWidener {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEffect for StereoWidener {
    fn prepare(&mut self, _sample_rate: f32, _max_frames: usize, _channels: usize) {}

    fn process_block(&mut self, buffer: &mut BlockBuffer) {
        if buffer.num_channels() < 2 {
            return;
        }

        let inv_width = 1.0 / self.width;
        let mid = 0.5 * (1.0 + inv_width);
        let side = 0.5 * (1.0 - inv_width);

        let frames = buffer.frames();
        let (left, right) = buffer.stereo_pair_mut();
        for frame in 0..frames {
            let l = left[frame];
            let r = right[frame];
            left[frame] = mid * l - side * r;
            right[frame] = mid * r - side * l;
        }
    }

    fn reset(&mut self) {}
}
