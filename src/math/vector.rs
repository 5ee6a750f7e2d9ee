/// Vector value types for the rendering pipeline.
///
/// Every operation returns a new value; nothing mutates in place. The crate
/// uses the row-vector convention throughout: points and directions transform
/// as `v * M`, so `v * (a * b)` applies `a` first, then `b`.
///
/// Normalizing or measuring the angle of a zero-length vector yields NaN
/// components rather than an error. Callers that care must guard their inputs.
use std::ops::{Add, Mul, Sub};

use super::matrix::Mat4;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, v: Self) -> f32 {
        self.x * v.x + self.y * v.y
    }

    #[inline]
    pub fn magnitude_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, v: Self) -> f32 {
        (self - v).magnitude()
    }

    #[inline]
    pub fn normalized(self) -> Self {
        self * (1.0 / self.magnitude())
    }

    /// Angle between two vectors in radians. Both operands must be non-zero;
    /// degenerate input propagates NaN.
    pub fn angle(self, v: Self) -> f32 {
        let m = (self.magnitude_sq() * v.magnitude_sq()).sqrt();
        (self.dot(v) / m).acos()
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

impl Mul for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, v: Self) -> Self {
        Self::new(self.x * v.x, self.y * v.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, v: Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    #[inline]
    pub fn cross(self, v: Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    #[inline]
    pub fn magnitude_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, v: Self) -> f32 {
        (self - v).magnitude()
    }

    #[inline]
    pub fn normalized(self) -> Self {
        self * (1.0 / self.magnitude())
    }

    /// Angle between two vectors in radians. Both operands must be non-zero;
    /// degenerate input propagates NaN.
    pub fn angle(self, v: Self) -> f32 {
        let m = (self.magnitude_sq() * v.magnitude_sq()).sqrt();
        (self.dot(v) / m).acos()
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, v: Self) -> Self {
        Self::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Homogeneous 4-component vector. Clip-space positions live here.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a point (or direction, with `w = 0`) to homogeneous space.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drop the homogeneous coordinate.
    #[inline]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn dot(self, v: Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w * v.w
    }

    #[inline]
    pub fn magnitude_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_sq().sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Self {
        self * (1.0 / self.magnitude())
    }
}

impl From<Vec3> for Vec4 {
    /// Points default to `w = 1`.
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v, 1.0)
    }
}

impl Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z, self.w + v.w)
    }
}

impl Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z, self.w - v.w)
    }
}

impl Mul for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, v: Self) -> Self {
        Self::new(self.x * v.x, self.y * v.y, self.z * v.z, self.w * v.w)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Self;

    /// Row-vector product `v * M`.
    #[inline]
    fn mul(self, m: Mat4) -> Self {
        Self::new(
            self.x * m.m[0] + self.y * m.m[4] + self.z * m.m[8] + self.w * m.m[12],
            self.x * m.m[1] + self.y * m.m[5] + self.z * m.m[9] + self.w * m.m[13],
            self.x * m.m[2] + self.y * m.m[6] + self.z * m.m[10] + self.w * m.m[14],
            self.x * m.m[3] + self.y * m.m[7] + self.z * m.m[11] + self.w * m.m[15],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn normalized_vector_has_unit_magnitude() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!(approx(v.normalized().magnitude(), 1.0));

        let v2 = Vec2::new(-7.5, 0.25);
        assert!(approx(v2.normalized().magnitude(), 1.0));

        let v4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!(approx(v4.normalized().magnitude(), 1.0));
    }

    #[test]
    fn zero_vector_normalization_propagates_nan() {
        let n = Vec3::ZERO.normalized();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn cross_product_follows_axis_convention() {
        let z = Vec3::RIGHT.cross(Vec3::UP);
        assert_eq!(z, Vec3::FORWARD);
        // Anti-commutative
        assert_eq!(Vec3::UP.cross(Vec3::RIGHT), Vec3::BACK);
    }

    #[test]
    fn angle_between_orthogonal_vectors_is_right() {
        let a = Vec3::RIGHT.angle(Vec3::UP);
        assert!(approx(a, std::f32::consts::FRAC_PI_2));
    }

    #[test]
    fn angle_of_zero_vector_is_nan() {
        assert!(Vec3::ZERO.angle(Vec3::UP).is_nan());
    }

    #[test]
    fn vec4_from_vec3_defaults_homogeneous_one() {
        let v: Vec4 = Vec3::new(1.0, 2.0, 3.0).into();
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn row_vector_matrix_product_uses_rows() {
        // Translation lives in the bottom row; a point picks it up, a
        // direction (w = 0) does not.
        let t = Mat4::IDENTITY.translate(Vec3::new(10.0, 20.0, 30.0));
        let p = Vec4::from_vec3(Vec3::new(1.0, 2.0, 3.0), 1.0) * t;
        assert_eq!(p.xyz(), Vec3::new(11.0, 22.0, 33.0));

        let d = Vec4::from_vec3(Vec3::new(1.0, 2.0, 3.0), 0.0) * t;
        assert_eq!(d.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }
}
