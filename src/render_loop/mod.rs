/// Host-facing render loop: an explicit, host-owned object instead of a
/// global. One iteration runs to completion (clear, shade, rasterize, swap)
/// before yielding to the host's frame-scheduling primitive; the stop flag
/// is checked exactly once per iteration, never mid-frame.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::rendering::{FrameStats, Renderer};

/// The host's animation-frame primitive: blocks until the next iteration
/// should begin.
pub trait FrameScheduler {
    fn wait_for_frame(&mut self);
}

/// Sleeps toward a fixed per-frame deadline, the stand-in for a display
/// refresh when no windowing system drives the loop.
pub struct FixedRateScheduler {
    frame_time: Duration,
    next_deadline: Option<Instant>,
}

impl FixedRateScheduler {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            next_deadline: None,
        }
    }
}

impl Default for FixedRateScheduler {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn wait_for_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline.max(now) + self.frame_time);
    }
}

/// Cloneable stop handle. `stop()` cancels the pending iteration, so no
/// further frames execute after a stop request.
#[derive(Clone)]
pub struct LoopControl {
    running: Arc<AtomicBool>,
}

impl LoopControl {
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

type RenderCallback = Box<dyn FnMut(&[u8], FrameStats)>;

pub struct RenderLoop {
    renderer: Renderer,
    render_callback: Option<RenderCallback>,
    running: Arc<AtomicBool>,
}

impl RenderLoop {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            render_callback: None,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Present callback invoked after each frame with the finished color
    /// buffer and the frame-timing counters.
    pub fn set_render_callback(&mut self, callback: impl FnMut(&[u8], FrameStats) + 'static) {
        self.render_callback = Some(Box::new(callback));
    }

    pub fn set_viewport_size(&mut self, width: usize, height: usize) {
        self.renderer.set_viewport_size(width, height);
    }

    pub fn control(&self) -> LoopControl {
        LoopControl {
            running: Arc::clone(&self.running),
        }
    }

    pub fn stop(&self) {
        self.control().stop();
    }

    /// Run iterations until stopped. `frame` builds each frame against the
    /// renderer (clear, set uniforms, draw meshes); the loop then swaps the
    /// buffer, hands it to the present callback and waits on the scheduler.
    pub fn start<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
        mut frame: impl FnMut(&mut Renderer, &LoopControl),
    ) {
        self.running.store(true, Ordering::Relaxed);
        let control = self.control();

        while self.running.load(Ordering::Relaxed) {
            frame(&mut self.renderer, &control);

            self.renderer.switch_buffer();
            let stats = self.renderer.stats();
            if let Some(callback) = self.render_callback.as_mut() {
                callback(self.renderer.color_buffer(), stats);
            }

            scheduler.wait_for_frame();
        }
    }
}
