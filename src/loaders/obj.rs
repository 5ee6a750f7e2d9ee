/// OBJ-style mesh-description parser: `v`/`vt`/`vn` records and `f` faces
/// with `pos/uv/normal` corners (1-based indices). Repeated corners are
/// deduplicated; faces with more than three corners are fan-triangulated.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;

use crate::geometry::{Mesh, MeshError, Vertex};
use crate::math::{Vec2, Vec3};

use super::LoadError;

/// Read and parse a mesh description from disk. Missing and empty files are
/// hard failures.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }
    parse_obj(&content)
}

pub fn parse_obj(content: &str) -> Result<Mesh, LoadError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    // Face corners seen so far, mapped to their vertex index.
    let mut corner_cache: HashMap<String, u16> = HashMap::new();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    for (line_index, raw_line) in content.lines().enumerate() {
        let line_no = line_index + 1;
        let line = raw_line.trim();
        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };

        match keyword {
            "v" => positions.push(parse_vec3(fields, line_no)?),
            "vt" => tex_coords.push(parse_vec2(fields, line_no)?),
            "vn" => normals.push(parse_vec3(fields, line_no)?),
            "f" => {
                let mut face: Vec<u16> = Vec::new();
                for corner in fields {
                    let index = match corner_cache.get(corner) {
                        Some(&cached) => cached,
                        None => {
                            let vertex = parse_corner(
                                corner, &positions, &tex_coords, &normals, line_no,
                            )?;
                            let index = u16::try_from(vertices.len())
                                .map_err(|_| MeshError::TooManyVertices(vertices.len() + 1))?;
                            vertices.push(vertex);
                            corner_cache.insert(corner.to_string(), index);
                            index
                        }
                    };
                    face.push(index);
                }
                if face.len() < 3 {
                    return Err(LoadError::Parse {
                        line: line_no,
                        message: format!("face has {} corners, need at least 3", face.len()),
                    });
                }
                // Fan triangulation around the first corner.
                for i in 1..face.len() - 1 {
                    indices.push(face[0]);
                    indices.push(face[i]);
                    indices.push(face[i + 1]);
                }
            }
            // Comments, object/group names, materials: ignored.
            _ => {}
        }
    }

    let mesh = Mesh::from_arrays(vertices, indices)?;
    info!(
        "parsed mesh description: {} vertices, {} triangles",
        mesh.vertices().len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn parse_f32<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<f32, LoadError> {
    let field = fields.next().ok_or_else(|| LoadError::Parse {
        line,
        message: "missing coordinate".into(),
    })?;
    field.parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("invalid number {field:?}"),
    })
}

fn parse_vec2<'a>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec2, LoadError> {
    Ok(Vec2::new(
        parse_f32(&mut fields, line)?,
        parse_f32(&mut fields, line)?,
    ))
}

fn parse_vec3<'a>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, LoadError> {
    Ok(Vec3::new(
        parse_f32(&mut fields, line)?,
        parse_f32(&mut fields, line)?,
        parse_f32(&mut fields, line)?,
    ))
}

/// Resolve one `pos`, `pos/uv`, `pos//normal` or `pos/uv/normal` corner.
fn parse_corner(
    corner: &str,
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
    line: usize,
) -> Result<Vertex, LoadError> {
    let mut parts = corner.split('/');

    let position = *lookup(parts.next(), positions, corner, line)?.ok_or_else(|| {
        LoadError::Parse {
            line,
            message: format!("corner {corner:?} has no position index"),
        }
    })?;
    let tex_coord = lookup(parts.next(), tex_coords, corner, line)?.copied();
    let normal = lookup(parts.next(), normals, corner, line)?.copied();

    let mut vertex = Vertex::new(position);
    if let Some(t) = tex_coord {
        vertex = vertex.with_tex_coord(t);
    }
    if let Some(n) = normal {
        vertex = vertex.with_normal(n);
    }
    Ok(vertex)
}

/// Resolve an optional 1-based index field against its source bucket.
fn lookup<'a, T>(
    field: Option<&str>,
    bucket: &'a [T],
    corner: &str,
    line: usize,
) -> Result<Option<&'a T>, LoadError> {
    let Some(field) = field else {
        return Ok(None);
    };
    if field.is_empty() {
        return Ok(None);
    }
    let index: usize = field.parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("invalid index {field:?} in corner {corner:?}"),
    })?;
    bucket
        .get(index.wrapping_sub(1))
        .map(Some)
        .ok_or_else(|| LoadError::Parse {
            line,
            message: format!("index {index} in corner {corner:?} is out of range"),
        })
}
