//! Rigid body rotation and translation of mesh geometry

use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::Mesh;

/// Rotation state around three axes (in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// What a transformed value represents. Normals are rotated but never translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Position,
    Normal,
}

/// A rotation followed by a translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub rotation: Matrix3<f32>,
    pub translation: Vector3<f32>,
}

impl RigidTransform {
    pub fn new(rotation: &RotationState, translation: Vector3<f32>) -> Self {
        Self {
            rotation: Self::rotation_matrix(rotation),
            translation,
        }
    }

    /// Create a rotation matrix from a rotation state.
    ///
    /// With `a = z`, `b = y`, `c = x` this is `Rz(a) * Ry(b) * Rx(c)` written
    /// out term by term.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f32> {
        let (sina, cosa) = rotation.z.to_radians().sin_cos();
        let (sinb, cosb) = rotation.y.to_radians().sin_cos();
        let (sinc, cosc) = rotation.x.to_radians().sin_cos();

        Matrix3::new(
            cosa * cosb,
            cosa * sinb * sinc - sina * cosc,
            cosa * sinb * cosc + sina * sinc,
            sina * cosb,
            sina * sinb * sinc + cosa * cosc,
            sina * sinb * cosc - cosa * sinc,
            -sinb,
            cosb * sinc,
            cosb * cosc,
        )
    }

    pub fn apply(&self, value: &Vector3<f32>, kind: VertexKind) -> Vector3<f32> {
        let rotated = self.rotation * value;
        match kind {
            VertexKind::Position => rotated + self.translation,
            VertexKind::Normal => rotated,
        }
    }

    pub fn apply_point(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.apply(&point.coords, VertexKind::Position))
    }
}

impl Mesh {
    /// Write the rotated and translated geometry of every triangle into its
    /// render state.
    pub fn apply_transformations(&mut self) {
        let transform = RigidTransform::new(&self.rotation, self.position);

        for triangle in self.triangles_mut() {
            let vertices = triangle.vertices().map(|v| transform.apply_point(&v));
            let normal = transform.apply(triangle.normal(), VertexKind::Normal);

            let render = triangle.render_mut();
            render.vertices = vertices;
            render.normal = normal;
        }
    }
}
