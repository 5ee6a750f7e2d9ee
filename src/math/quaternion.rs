/// Unit quaternion used for camera and model rotations.
use super::vector::Vec3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation from Euler angles in degrees, composed from per-axis
    /// half-angle products in z-y-x application order.
    pub fn from_euler(v: Vec3) -> Self {
        let x = v.x.to_radians();
        let y = v.y.to_radians();
        let z = v.z.to_radians();

        let (sx, cx) = (x * 0.5).sin_cos();
        let (sy, cy) = (y * 0.5).sin_cos();
        let (sz, cz) = (z * 0.5).sin_cos();

        Self::new(
            sx * cy * cz - cx * sy * sz,
            cx * sy * cz + sx * cy * sz,
            cx * cy * sz - sx * sy * cz,
            cx * cy * cz + sx * sy * sz,
        )
    }

    /// Rotation of `angle_deg` degrees about `axis` (normalized internally).
    pub fn from_axis_angle(axis: Vec3, angle_deg: f32) -> Self {
        let half = angle_deg.to_radians() * 0.5;
        let (s, c) = half.sin_cos();
        let a = axis.normalized();
        Self::new(a.x * s, a.y * s, a.z * s, c)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat4;

    #[test]
    fn zero_euler_angles_yield_identity() {
        assert_eq!(Quaternion::from_euler(Vec3::ZERO), Quaternion::IDENTITY);
    }

    #[test]
    fn identity_quaternion_yields_identity_matrix() {
        assert_eq!(Mat4::from_quaternion(Quaternion::IDENTITY), Mat4::IDENTITY);
    }

    #[test]
    fn from_euler_produces_unit_quaternion() {
        let q = Quaternion::from_euler(Vec3::new(30.0, -45.0, 120.0));
        assert!((q.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn euler_yaw_matches_axis_angle_about_up() {
        let a = Quaternion::from_euler(Vec3::new(0.0, 90.0, 0.0));
        let b = Quaternion::from_axis_angle(Vec3::UP, 90.0);
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
        assert!((a.z - b.z).abs() < 1e-6);
        assert!((a.w - b.w).abs() < 1e-6);
    }
}
