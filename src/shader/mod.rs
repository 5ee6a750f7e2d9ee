/// Programmable shader contract: a vertex stage and a fragment stage the
/// host supplies per draw call. The renderer stays agnostic to varying
/// names; it only recognizes the 2- and 3-component vector shapes for
/// perspective-correct interpolation and ignores everything else.
///
/// Uniform state lives in the shader struct itself. The host mutates it
/// between draw calls; the renderer takes `&dyn Shader` and is read-only
/// for the duration of one `draw_mesh`.
use crate::geometry::{Color, Vertex};
use crate::loaders::Texture;
use crate::math::{Mat4, Vec2, Vec3, Vec4};

/// A named per-vertex attribute value. Only these two shapes are
/// interpolated across a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Varying {
    Vec2(Vec2),
    Vec3(Vec3),
}

/// Insertion-ordered name -> value map for varyings. Shaders emit a handful
/// of attributes, so a flat list beats a hash map here.
#[derive(Clone, Debug, Default)]
pub struct VaryingSet {
    entries: Vec<(&'static str, Varying)>,
}

impl VaryingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the attribute named `name`.
    pub fn set(&mut self, name: &'static str, value: Varying) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<Varying> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn get_vec2(&self, name: &str) -> Option<Vec2> {
        match self.get(name) {
            Some(Varying::Vec2(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name) {
            Some(Varying::Vec3(v)) => Some(v),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Varying)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vertex-stage output. The clip-space position is a required field, so a
/// shader cannot produce output without one.
#[derive(Clone, Debug)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub varyings: VaryingSet,
}

impl VertexOutput {
    pub fn new(clip_position: Vec4) -> Self {
        Self {
            clip_position,
            varyings: VaryingSet::new(),
        }
    }

    pub fn with_varying(mut self, name: &'static str, value: Varying) -> Self {
        self.varyings.set(name, value);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FragmentOutput {
    pub color: Color,
}

pub trait Shader {
    /// Run once per unique vertex of a mesh draw.
    fn vertex(&self, vertex: &Vertex) -> VertexOutput;

    /// Run once per covered pixel with perspective-correct interpolated
    /// varyings.
    fn fragment(&self, varyings: &VaryingSet) -> FragmentOutput;
}

/// Pass-through shader: no transform, constant-color fragments. The default
/// color is black; used for smoke-testing the pipeline.
#[derive(Copy, Clone, Debug)]
pub struct FlatShader {
    pub color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for FlatShader {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Shader for FlatShader {
    fn vertex(&self, vertex: &Vertex) -> VertexOutput {
        VertexOutput::new(vertex.position.into())
    }

    fn fragment(&self, _varyings: &VaryingSet) -> FragmentOutput {
        FragmentOutput { color: self.color }
    }
}

/// Ambient + Lambert diffuse shader with optional nearest-sampled texture.
pub struct PhongShader {
    pub transform: Mat4,
    pub transform_inverse_transpose: Mat4,
    pub view_projection: Mat4,
    pub base_color: Color,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub ambient_strength: f32,
    pub texture: Option<Texture>,
}

impl Default for PhongShader {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            transform_inverse_transpose: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            base_color: Color::WHITE,
            light_position: Vec3::new(0.0, 5.0, -15.0),
            light_color: Vec3::ONE,
            ambient_strength: 0.1,
            texture: None,
        }
    }
}

impl Shader for PhongShader {
    fn vertex(&self, vertex: &Vertex) -> VertexOutput {
        let position = Vec4::from(vertex.position);
        let clip = position * (self.transform * self.view_projection);
        let world = (position * self.transform).xyz();

        let mut out = VertexOutput::new(clip)
            .with_varying("frag_position", Varying::Vec3(world));

        if let Some(normal) = vertex.normal {
            let n = (Vec4::from_vec3(normal, 0.0) * self.transform_inverse_transpose).xyz();
            out.varyings.set("normal", Varying::Vec3(n));
        }
        if let Some(tex_coord) = vertex.tex_coord {
            out.varyings.set("texture_coords", Varying::Vec2(tex_coord));
        }
        out
    }

    fn fragment(&self, varyings: &VaryingSet) -> FragmentOutput {
        let mut rgb = self.base_color.to_unit();

        if let (Some(texture), Some(uv)) = (&self.texture, varyings.get_vec2("texture_coords")) {
            rgb = texture.sample(uv.x, uv.y).to_unit();
        }

        if let (Some(normal), Some(frag_position)) = (
            varyings.get_vec3("normal"),
            varyings.get_vec3("frag_position"),
        ) {
            let n = normal.normalized();
            let light_dir = (self.light_position - frag_position).normalized();
            let diffuse = light_dir.dot(n).max(0.0);
            let light = self.light_color * self.ambient_strength + self.light_color * diffuse;
            rgb = rgb * light;
        }

        FragmentOutput {
            color: Color::from_unit(rgb, self.base_color.a),
        }
    }
}
