/// 4x4 matrix in row-major flat storage, row-vector convention.
///
/// `a * b` is the matrix product `a . b`; transforming by it applies `a`
/// first, then `b`. Both projection factories map view-space depth into
/// NDC `[0, 1]` with the camera looking toward +z, and the renderer's clip
/// test and depth comparison assume the same convention.
use std::ops::Mul;

use super::quaternion::Quaternion;
use super::vector::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    /// Flat row-major storage: element (row, col) lives at `m[row * 4 + col]`.
    pub m: [f32; 16],
}

impl Mat4 {
    pub const ZERO: Self = Self { m: [0.0; 16] };

    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[inline]
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[row * 4 + col] = value;
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.m[col * 4 + row] = self.m[row * 4 + col];
            }
        }
        out
    }

    /// 3x3 minor determinant with `row` and `col` struck out.
    fn minor(&self, row: usize, col: usize) -> f32 {
        let mut sub = [0.0f32; 9];
        let mut i = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            for c in 0..4 {
                if c == col {
                    continue;
                }
                sub[i] = self.m[r * 4 + c];
                i += 1;
            }
        }
        sub[0] * (sub[4] * sub[8] - sub[5] * sub[7])
            - sub[1] * (sub[3] * sub[8] - sub[5] * sub[6])
            + sub[2] * (sub[3] * sub[7] - sub[4] * sub[6])
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let mut det = 0.0;
        let mut sign = 1.0;
        for col in 0..4 {
            det += sign * self.m[col] * self.minor(0, col);
            sign = -sign;
        }
        det
    }

    /// Adjugate-over-determinant inverse.
    ///
    /// A singular matrix (determinant exactly 0) yields the identity rather
    /// than an error; callers must not rely on inverting singular input.
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det == 0.0 {
            return Self::IDENTITY;
        }
        let inv_det = 1.0 / det;
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                // Adjugate transposes the cofactor matrix.
                out.m[col * 4 + row] = sign * self.minor(row, col) * inv_det;
            }
        }
        out
    }

    /// Post-multiply a translation into a copy.
    #[inline]
    pub fn translate(&self, v: Vec3) -> Self {
        *self * Self::translation(v)
    }

    /// Post-multiply a scale into a copy.
    #[inline]
    pub fn scale(&self, v: Vec3) -> Self {
        *self * Self::scaling(v)
    }

    #[rustfmt::skip]
    pub const fn translation(v: Vec3) -> Self {
        Self::from_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            v.x, v.y, v.z, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub const fn scaling(v: Vec3) -> Self {
        Self::from_array([
            v.x, 0.0, 0.0, 0.0,
            0.0, v.y, 0.0, 0.0,
            0.0, 0.0, v.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation matrix for a (unit) quaternion, row-vector form.
    pub fn from_quaternion(q: Quaternion) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let mut out = Self::IDENTITY;

        out.m[0] = 1.0 - 2.0 * (y * y + z * z);
        out.m[1] = 2.0 * (x * y + z * w);
        out.m[2] = 2.0 * (x * z - y * w);

        out.m[4] = 2.0 * (x * y - z * w);
        out.m[5] = 1.0 - 2.0 * (x * x + z * z);
        out.m[6] = 2.0 * (y * z + x * w);

        out.m[8] = 2.0 * (x * z + y * w);
        out.m[9] = 2.0 * (y * z - x * w);
        out.m[10] = 1.0 - 2.0 * (x * x + y * y);

        out
    }

    /// Rotation of `angle_deg` degrees about `axis`.
    pub fn from_axis_angle(axis: Vec3, angle_deg: f32) -> Self {
        Self::from_quaternion(Quaternion::from_axis_angle(axis, angle_deg))
    }

    /// Orthographic projection with `[0, 1]` NDC depth.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut out = Self::ZERO;
        out.m[0] = 2.0 / (right - left);
        out.m[5] = 2.0 / (top - bottom);
        out.m[10] = 1.0 / (far - near);
        out.m[12] = (left + right) / (left - right);
        out.m[13] = (top + bottom) / (bottom - top);
        out.m[14] = near / (near - far);
        out.m[15] = 1.0;
        out
    }

    /// Perspective projection: vertical field of view in degrees, `[0, 1]`
    /// NDC depth, camera looking toward +z. `v * M` leaves view-space z in
    /// the w component for the perspective divide.
    pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_deg.to_radians() * 0.5).tan();
        let mut out = Self::ZERO;
        out.m[0] = f / aspect;
        out.m[5] = f;
        out.m[10] = far / (far - near);
        out.m[11] = 1.0;
        out.m[14] = -(near * far) / (far - near);
        out
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.m[row * 4 + k] * rhs.m[k * 4 + col];
                }
                out.m[row * 4 + col] = acc;
            }
        }
        out
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        let mut out = self;
        for v in out.m.iter_mut() {
            *v *= s;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;

    fn approx_identity(m: &Mat4) -> bool {
        m.m.iter()
            .zip(Mat4::IDENTITY.m.iter())
            .all(|(a, b)| (a - b).abs() < 1e-4)
    }

    #[test]
    fn identity_determinant_is_one() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn inverse_of_composed_transform_round_trips() {
        let m = Mat4::IDENTITY
            .translate(Vec3::new(1.0, -2.0, 3.0))
            .scale(Vec3::new(2.0, 4.0, 0.5))
            * Mat4::from_axis_angle(Vec3::UP, 30.0);
        let product = m * m.inverse();
        assert!(approx_identity(&product), "M * inverse(M) = {:?}", product);
    }

    #[test]
    fn singular_matrix_inverse_is_identity() {
        let singular = Mat4::IDENTITY.scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(singular.determinant(), 0.0);
        assert_eq!(singular.inverse(), Mat4::IDENTITY);
        assert_eq!(Mat4::ZERO.inverse(), Mat4::IDENTITY);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let mut m = Mat4::ZERO;
        m.set(0, 3, 7.0);
        m.set(2, 1, -4.0);
        let t = m.transpose();
        assert_eq!(t.get(3, 0), 7.0);
        assert_eq!(t.get(1, 2), -4.0);
    }

    #[test]
    fn scalar_multiply_scales_every_element() {
        let m = Mat4::IDENTITY * 3.0;
        assert_eq!(m.get(0, 0), 3.0);
        assert_eq!(m.get(3, 3), 3.0);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn multiply_order_applies_left_operand_first() {
        // Scale then translate: the translation must not be scaled.
        let m = Mat4::scaling(Vec3::new(2.0, 2.0, 2.0))
            * Mat4::translation(Vec3::new(5.0, 0.0, 0.0));
        let p = Vec4::from_vec3(Vec3::new(1.0, 0.0, 0.0), 1.0) * m;
        assert_eq!(p.xyz(), Vec3::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn perspective_maps_near_and_far_onto_unit_depth() {
        let proj = Mat4::perspective(90.0, 1.0, 0.1, 100.0);

        let near = Vec4::new(0.0, 0.0, 0.1, 1.0) * proj;
        assert!((near.z / near.w).abs() < 1e-5);

        let far = Vec4::new(0.0, 0.0, 100.0, 1.0) * proj;
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthographic_maps_near_and_far_onto_unit_depth() {
        let proj = Mat4::orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);

        let near = Vec4::new(0.0, 0.0, -1.0, 1.0) * proj;
        assert!(near.z.abs() < 1e-6);

        let far = Vec4::new(0.0, 0.0, 1.0, 1.0) * proj;
        assert!((far.z - 1.0).abs() < 1e-6);
    }
}
