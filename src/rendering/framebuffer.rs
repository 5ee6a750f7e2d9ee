/// Frame buffers for software rendering: an RGBA8 color buffer and an f32
/// depth buffer, both exclusively owned and mutated by the renderer within
/// a single frame.
use log::debug;

use crate::geometry::Color;

pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![0; width * height * 4],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    /// Reallocate both buffers for a new viewport. Depth resets to +infinity.
    /// Must not be called while a frame is in flight.
    pub fn resize(&mut self, width: usize, height: usize) {
        debug!(
            "framebuffer resize: {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.color = vec![0; width * height * 4];
        self.depth = vec![f32::INFINITY; width * height];
    }

    /// Zero the color buffer and reset depth.
    pub fn clear(&mut self) {
        self.color.fill(0);
        self.reset_depth();
    }

    /// Flood the color buffer with one color. Depth is untouched.
    pub fn fill(&mut self, color: Color) {
        for px in self.color.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    /// Reset every depth sample to +infinity, so the first fragment at each
    /// pixel always passes the depth test.
    pub fn reset_depth(&mut self) {
        self.depth.fill(f32::INFINITY);
    }

    /// Depth-tested pixel write. The write wins only if `depth` is strictly
    /// smaller than the stored value. Out-of-bounds coordinates are a no-op.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color, depth: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        if depth < self.depth[index] {
            self.depth[index] = depth;
            self.write_color(index, color);
            true
        } else {
            false
        }
    }

    /// Pixel write that bypasses the depth test (wireframe, debug overlays).
    #[inline]
    pub fn set_pixel_no_depth(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.write_color(y * self.width + x, color);
        }
    }

    #[inline]
    fn write_color(&mut self, index: usize, color: Color) {
        let i = index * 4;
        self.color[i] = color.r;
        self.color[i + 1] = color.g;
        self.color[i + 2] = color.b;
        self.color[i + 3] = color.a;
    }

    #[inline]
    pub fn color_slice(&self) -> &[u8] {
        &self.color
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depth[y * self.width + x])
        } else {
            None
        }
    }
}

/// Integer nearest-neighbor upscale of an RGBA8 buffer. Used by hosts that
/// render at a reduced internal resolution and present at window size.
pub fn upscale_rgba(buffer: &[u8], width: usize, height: usize, ratio: usize) -> Vec<u8> {
    let ratio = ratio.max(1);
    let out_w = width * ratio;
    let out_h = height * ratio;
    let mut out = vec![0u8; out_w * out_h * 4];

    for oy in 0..out_h {
        let sy = oy / ratio;
        for ox in 0..out_w {
            let sx = ox / ratio;
            let src = (sy * width + sx) * 4;
            let dst = (oy * out_w + ox) * 4;
            out[dst..dst + 4].copy_from_slice(&buffer[src..src + 4]);
        }
    }
    out
}
