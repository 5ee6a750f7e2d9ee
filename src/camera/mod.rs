/// Camera: position plus Euler rotation (degrees), with cached view and
/// projection matrices. `view = inverse(translate(position) * rotation)`,
/// and a point transforms as `v * view * projection`.
use crate::math::{Mat4, Quaternion, Vec3, Vec4};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

pub struct Camera {
    position: Vec3,
    /// Euler angles in degrees.
    rotation: Vec3,
    aspect: f32,
    kind: ProjectionKind,
    projection: Mat4,
    view: Mat4,
}

impl Camera {
    pub const FOV_DEG: f32 = 90.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 100.0;

    pub fn new(kind: ProjectionKind) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            aspect: 1.0,
            kind,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        };
        camera.rebuild_projection();
        camera.rebuild_view();
        camera
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.rebuild_view();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.rebuild_view();
    }

    /// Camera-relative translation: `delta` is rotated by the current
    /// orientation before being added to the position.
    pub fn move_by(&mut self, delta: Vec3) {
        let rotated = (Vec4::from_vec3(delta, 0.0) * self.orientation()).xyz();
        self.position = self.position + rotated;
        self.rebuild_view();
    }

    pub fn rotate_by(&mut self, delta: Vec3) {
        self.rotation = self.rotation + delta;
        self.rebuild_view();
    }

    /// Rebuilds the projection matrix only. Call on viewport resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_projection();
    }

    /// Combined `view * projection`; transform points as
    /// `v * view_projection()`.
    pub fn view_projection(&self) -> Mat4 {
        self.view * self.projection
    }

    fn orientation(&self) -> Mat4 {
        Mat4::from_quaternion(Quaternion::from_euler(self.rotation))
    }

    fn rebuild_view(&mut self) {
        let transform = Mat4::IDENTITY.translate(self.position) * self.orientation();
        self.view = transform.inverse();
    }

    fn rebuild_projection(&mut self) {
        self.projection = match self.kind {
            ProjectionKind::Perspective => {
                Mat4::perspective(Self::FOV_DEG, self.aspect, Self::NEAR, Self::FAR)
            }
            ProjectionKind::Orthographic => {
                Mat4::orthographic(-self.aspect, self.aspect, -1.0, 1.0, -1.0, 1.0)
            }
        };
    }
}
