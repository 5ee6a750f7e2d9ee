/// Geometry model: vertices, indexed triangle meshes and RGBA colors.
/// Meshes are immutable after construction; indices are 16-bit, so a single
/// mesh can reference at most 65 536 distinct vertices.
use thiserror::Error;

use crate::math::{Vec2, Vec3};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has {0} vertices, more than a 16-bit index can address")]
    TooManyVertices(usize),
    #[error("index {index} names a vertex outside 0..{vertex_count}")]
    IndexOutOfRange { index: u16, vertex_count: usize },
}

/// One mesh vertex: a required position plus optional texture coordinate
/// and normal. Constructed once per mesh-authoring call, never mutated.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub tex_coord: Option<Vec2>,
    pub normal: Option<Vec3>,
}

impl Vertex {
    #[inline]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            tex_coord: None,
            normal: None,
        }
    }

    #[inline]
    pub const fn with_tex_coord(mut self, tex_coord: Vec2) -> Self {
        self.tex_coord = Some(tex_coord);
        self
    }

    #[inline]
    pub const fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }
}

/// An ordered vertex list plus a 16-bit index list read in consecutive
/// triples, each triple naming one triangle.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl Mesh {
    pub fn from_arrays(vertices: Vec<Vertex>, indices: Vec<u16>) -> Result<Self, MeshError> {
        if vertices.len() > u16::MAX as usize + 1 {
            return Err(MeshError::TooManyVertices(vertices.len()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index: bad,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Index triples; a trailing partial triple is ignored.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit quad in the z = 0 plane with texture coordinates.
    pub fn quad() -> Self {
        Self {
            vertices: vec![
                Vertex::new(Vec3::new(0.5, 0.5, 0.0)).with_tex_coord(Vec2::new(1.0, 1.0)),
                Vertex::new(Vec3::new(0.5, -0.5, 0.0)).with_tex_coord(Vec2::new(1.0, 0.0)),
                Vertex::new(Vec3::new(-0.5, -0.5, 0.0)).with_tex_coord(Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(-0.5, 0.5, 0.0)).with_tex_coord(Vec2::new(0.0, 1.0)),
            ],
            indices: vec![0, 1, 3, 1, 2, 3],
        }
    }
}

/// 8-bit RGBA color, the pixel format of the color buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Map unit-range channel floats into 8-bit channels with clamping.
    pub fn from_unit(v: Vec3, a: u8) -> Self {
        let to_u8 = |c: f32| (c * 255.0).clamp(0.0, 255.0) as u8;
        Self {
            r: to_u8(v.x),
            g: to_u8(v.y),
            b: to_u8(v.z),
            a,
        }
    }

    /// Channels as unit-range floats (alpha dropped).
    #[inline]
    pub fn to_unit(self) -> Vec3 {
        Vec3::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}
