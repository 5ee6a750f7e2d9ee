/// Software rendering: frame buffers and the per-triangle pipeline.
pub mod framebuffer;
pub mod renderer;

pub use framebuffer::{upscale_rgba, FrameBuffer};
pub use renderer::{FrameStats, Renderer, WIREFRAME_COLOR};
