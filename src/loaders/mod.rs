/// Asset loaders: text-based mesh descriptions and bitmap textures.
/// Missing or empty external resources are hard failures surfaced to the
/// caller; nothing here retries.
pub mod obj;
pub mod texture;

pub use obj::{load_obj, parse_obj};
pub use texture::Texture;

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::MeshError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is empty")]
    EmptyFile(PathBuf),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
