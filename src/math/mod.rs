/// Math kernel: vectors, a 4x4 matrix and a quaternion, all `Copy` value
/// types with row-vector semantics (`v * M`).
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use matrix::Mat4;
pub use quaternion::Quaternion;
pub use vector::{Vec2, Vec3, Vec4};
