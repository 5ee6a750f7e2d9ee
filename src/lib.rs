/// softpipe - a software 3D rendering pipeline.
/// Meshes run through a programmable vertex stage, a whole-triangle clip
/// test, back-face culling and a barycentric rasterizer with
/// perspective-correct varying interpolation and z-buffering. A host drives
/// the pipeline through the render-loop contract and presents the color
/// buffer however it likes.
pub mod camera;
pub mod geometry;
pub mod loaders;
pub mod math;
pub mod render_loop;
pub mod rendering;
pub mod shader;

pub use camera::{Camera, ProjectionKind};
pub use geometry::{Color, Mesh, MeshError, Vertex};
pub use loaders::{load_obj, parse_obj, LoadError, Texture};
pub use math::{Mat4, Quaternion, Vec2, Vec3, Vec4};
pub use render_loop::{FixedRateScheduler, FrameScheduler, LoopControl, RenderLoop};
pub use rendering::{upscale_rgba, FrameBuffer, FrameStats, Renderer, WIREFRAME_COLOR};
pub use shader::{
    FlatShader, FragmentOutput, PhongShader, Shader, Varying, VaryingSet, VertexOutput,
};
