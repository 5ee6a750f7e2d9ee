/// Per-triangle rendering pipeline: cached vertex shading, whole-triangle
/// clip testing, back-face culling, viewport transform, barycentric fill
/// with perspective-correct varying interpolation and z-buffering, plus a
/// Bresenham wireframe mode.
use std::time::Instant;

use log::warn;

use crate::geometry::{Color, Mesh};
use crate::math::{Vec2, Vec3, Vec4};
use crate::shader::{Shader, Varying, VaryingSet, VertexOutput};

use super::framebuffer::FrameBuffer;

/// Fixed debug color used by wireframe rasterization.
pub const WIREFRAME_COLOR: Color = Color::new(0, 255, 0);

/// Frame-timing counters advanced by `switch_buffer`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameStats {
    /// Seconds between the last two buffer switches.
    pub delta_time: f32,
    pub fps: f32,
    pub frame_count: u64,
}

pub struct Renderer {
    framebuffer: FrameBuffer,
    /// Rasterize triangle edges only, bypassing shading and the depth test.
    pub wireframe: bool,
    stats: FrameStats,
    last_switch: Option<Instant>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            wireframe: false,
            stats: FrameStats::default(),
            last_switch: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Reallocate both buffers. Must not be called while a frame is in
    /// flight; the pipeline is single-threaded, so ordinary call order
    /// guarantees that.
    pub fn set_viewport_size(&mut self, width: usize, height: usize) {
        self.framebuffer.resize(width, height);
    }

    /// Start-of-frame clear: flood the color buffer and reset depth.
    pub fn fill_buffer(&mut self, color: Color) {
        self.framebuffer.fill(color);
        self.framebuffer.reset_depth();
    }

    /// Start-of-frame clear to transparent black, resetting depth.
    pub fn clear_buffer(&mut self) {
        self.framebuffer.clear();
    }

    #[inline]
    pub fn color_buffer(&self) -> &[u8] {
        self.framebuffer.color_slice()
    }

    /// Stored depth at a pixel; test hook.
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.framebuffer.depth_at(x, y)
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Hand the finished color buffer to the host and advance the frame
    /// counters. The first call yields zero delta and fps.
    pub fn switch_buffer(&mut self) -> &[u8] {
        let now = Instant::now();
        if let Some(last) = self.last_switch {
            let dt = (now - last).as_secs_f32();
            self.stats.delta_time = dt;
            self.stats.fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        }
        self.last_switch = Some(now);
        self.stats.frame_count += 1;
        self.framebuffer.color_slice()
    }

    /// Run the full pipeline for one mesh with the given shader. The shader
    /// is read-only for the duration of the call.
    pub fn draw_mesh(&mut self, mesh: &Mesh, shader: &dyn Shader) {
        if mesh.indices().len() % 3 != 0 {
            warn!(
                "mesh index count {} is not a multiple of 3; trailing indices ignored",
                mesh.indices().len()
            );
        }

        // Vertex stage, run once per unique vertex referenced by the mesh.
        let mut shaded: Vec<Option<VertexOutput>> =
            (0..mesh.vertices().len()).map(|_| None).collect();
        for &index in mesh.indices() {
            let i = index as usize;
            if shaded[i].is_none() {
                shaded[i] = Some(shader.vertex(&mesh.vertices()[i]));
            }
        }

        for tri in mesh.triangles() {
            let (Some(a), Some(b), Some(c)) = (
                shaded[tri[0] as usize].as_ref(),
                shaded[tri[1] as usize].as_ref(),
                shaded[tri[2] as usize].as_ref(),
            ) else {
                continue;
            };
            self.draw_triangle(a, b, c, shader);
        }
    }

    fn draw_triangle(
        &mut self,
        a: &VertexOutput,
        b: &VertexOutput,
        c: &VertexOutput,
        shader: &dyn Shader,
    ) {
        // Whole-triangle clip test: any vertex outside the clip volume drops
        // the triangle. Triangles straddling the boundary are dropped too
        // rather than clipped into sub-polygons.
        if outside_clip_volume(a.clip_position)
            || outside_clip_volume(b.clip_position)
            || outside_clip_volume(c.clip_position)
        {
            return;
        }

        let clip = [a.clip_position, b.clip_position, c.clip_position];

        // Perspective divide to NDC.
        let ndc = [
            clip[0].xyz() * (1.0 / clip[0].w),
            clip[1].xyz() * (1.0 / clip[1].w),
            clip[2].xyz() * (1.0 / clip[2].w),
        ];

        // Back-face cull in NDC. Front faces have a negative-z normal; this
        // also drops zero-area triangles.
        let normal_z = (ndc[1] - ndc[0]).cross(ndc[2] - ndc[0]).z;
        if normal_z >= 0.0 {
            return;
        }

        // Viewport transform: NDC [-1, 1] onto the pixel grid, y flipped so
        // it grows downward. NDC z rides along as the interpolation depth.
        let width = self.framebuffer.width;
        let height = self.framebuffer.height;
        if width == 0 || height == 0 {
            return;
        }
        let screen = ndc.map(|n| {
            Vec3::new(
                (n.x + 1.0) * 0.5 * (width - 1) as f32,
                (1.0 - (n.y + 1.0) * 0.5) * (height - 1) as f32,
                n.z,
            )
        });

        if self.wireframe {
            self.draw_line(screen[0], screen[1]);
            self.draw_line(screen[1], screen[2]);
            self.draw_line(screen[2], screen[0]);
            return;
        }

        self.fill_triangle(&screen, &clip, [a, b, c], shader);
    }

    fn fill_triangle(
        &mut self,
        screen: &[Vec3; 3],
        clip: &[Vec4; 3],
        outputs: [&VertexOutput; 3],
        shader: &dyn Shader,
    ) {
        let width = self.framebuffer.width;
        let height = self.framebuffer.height;

        // Clamped integer bounding box.
        let min_x = screen.iter().fold(f32::INFINITY, |m, p| m.min(p.x));
        let max_x = screen.iter().fold(f32::NEG_INFINITY, |m, p| m.max(p.x));
        let min_y = screen.iter().fold(f32::INFINITY, |m, p| m.min(p.y));
        let max_y = screen.iter().fold(f32::NEG_INFINITY, |m, p| m.max(p.y));

        let x0 = (min_x.floor() as i64).clamp(0, width as i64 - 1) as usize;
        let x1 = (max_x.ceil() as i64).clamp(0, width as i64 - 1) as usize;
        let y0 = (min_y.floor() as i64).clamp(0, height as i64 - 1) as usize;
        let y1 = (max_y.ceil() as i64).clamp(0, height as i64 - 1) as usize;

        let p0 = Vec2::new(screen[0].x, screen[0].y);
        let p1 = Vec2::new(screen[1].x, screen[1].y);
        let p2 = Vec2::new(screen[2].x, screen[2].y);

        let inv_w = [1.0 / clip[0].w, 1.0 / clip[1].w, 1.0 / clip[2].w];

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32, y as f32);
                let Some((u, v, w)) = barycentric(p, p0, p1, p2) else {
                    // Degenerate screen-space triangle.
                    return;
                };
                // Covered iff every weight is non-negative. No tie-break
                // rule: adjacent triangles may double-shade shared edges.
                if u < 0.0 || v < 0.0 || w < 0.0 {
                    continue;
                }

                // NDC z is linear in screen space, so depth interpolates
                // affinely.
                let depth = u * screen[0].z + v * screen[1].z + w * screen[2].z;

                let varyings = interpolate_varyings(
                    (u, v, w),
                    inv_w,
                    [&outputs[0].varyings, &outputs[1].varyings, &outputs[2].varyings],
                );
                let fragment = shader.fragment(&varyings);
                self.framebuffer.set_pixel(x, y, fragment.color, depth);
            }
        }
    }

    /// Integer Bresenham line in the fixed wireframe debug color, bypassing
    /// shading and the depth test.
    fn draw_line(&mut self, from: Vec3, to: Vec3) {
        let mut x0 = from.x.round() as i64;
        let mut y0 = from.y.round() as i64;
        let x1 = to.x.round() as i64;
        let y1 = to.y.round() as i64;

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x0 >= 0 && y0 >= 0 {
                self.framebuffer
                    .set_pixel_no_depth(x0 as usize, y0 as usize, WIREFRAME_COLOR);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// A vertex is outside the clip volume iff `w <= 0` or any of x, y, z falls
/// outside `[-w, w]`. Non-finite positions count as outside.
#[inline]
fn outside_clip_volume(v: Vec4) -> bool {
    if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite() && v.w.is_finite()) {
        return true;
    }
    v.w <= 0.0 || v.x.abs() > v.w || v.y.abs() > v.w || v.z.abs() > v.w
}

/// Barycentric weights of `p` relative to the triangle `(a, b, c)` via the
/// area-ratio formula. `None` for degenerate (zero-area) triangles.
#[inline]
fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<(f32, f32, f32)> {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom == 0.0 {
        return None;
    }
    let u = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let v = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    Some((u, v, 1.0 - u - v))
}

/// Perspective-correct interpolation: weight each vertex attribute by
/// `barycentric / clip_w`, then renormalize by the weight sum. Attributes
/// not present with the same shape on all three vertices are skipped.
fn interpolate_varyings(
    bary: (f32, f32, f32),
    inv_w: [f32; 3],
    sets: [&VaryingSet; 3],
) -> VaryingSet {
    let w0 = bary.0 * inv_w[0];
    let w1 = bary.1 * inv_w[1];
    let w2 = bary.2 * inv_w[2];
    let sum = w0 + w1 + w2;
    let mut out = VaryingSet::new();
    if sum == 0.0 {
        return out;
    }
    let norm = 1.0 / sum;

    for &(name, value) in sets[0].iter() {
        match (value, sets[1].get(name), sets[2].get(name)) {
            (Varying::Vec2(a), Some(Varying::Vec2(b)), Some(Varying::Vec2(c))) => {
                let v = (a * w0 + b * w1 + c * w2) * norm;
                out.set(name, Varying::Vec2(v));
            }
            (Varying::Vec3(a), Some(Varying::Vec3(b)), Some(Varying::Vec3(c))) => {
                let v = (a * w0 + b * w1 + c * w2) * norm;
                out.set(name, Varying::Vec3(v));
            }
            _ => {}
        }
    }
    out
}
