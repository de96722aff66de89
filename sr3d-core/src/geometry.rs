//! Geometry primitives for 3D rendering

use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;
use crate::math::{cross, normalize, sub};
use crate::transform::RotationState;

/// Per-frame derived state of a triangle.
///
/// Rewritten in full by [`Mesh::apply_transformations`] and
/// [`Camera::project_triangle`](crate::Camera::project_triangle) every frame;
/// the values are only meaningful once both have run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
    pub visible: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            vertices: [Point3::origin(); 3],
            normal: Vector3::zeros(),
            visible: true,
        }
    }
}

/// A triangle face with its authored vertices and unit normal
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
    normal: Vector3<f32>,
    render: RenderState,
}

impl Triangle {
    /// Build a triangle from three vertices in winding order.
    ///
    /// The normal is the normalized cross product of the two normalized
    /// edges `v1 - v0` and `v2 - v0`. Coincident or collinear vertices
    /// have no normal and are rejected.
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Result<Self, GeometryError> {
        let edge1 = normalize(&sub(&v1.coords, &v0.coords))?;
        let edge2 = normalize(&sub(&v2.coords, &v0.coords))?;
        let normal = normalize(&cross(&edge1, &edge2))?;

        Ok(Self {
            vertices: [v0, v1, v2],
            normal,
            render: RenderState::default(),
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    pub fn normal(&self) -> &Vector3<f32> {
        &self.normal
    }

    pub fn render(&self) -> &RenderState {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut RenderState {
        &mut self.render
    }
}

/// A 3D mesh composed of triangles, placed in the world by a translation
/// and three Euler angles
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    pub position: Vector3<f32>,
    pub rotation: RotationState,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Mutable access to the triangles. The triangle count itself is fixed.
    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Create an axis-aligned cube spanning `[0, size]` on every axis
    pub fn cube(size: f32) -> Result<Self, GeometryError> {
        let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
        let faces = [
            // Front
            [p(0.0, 0.0, 0.0), p(0.0, size, 0.0), p(size, size, 0.0), p(size, 0.0, 0.0)],
            // Back
            [p(0.0, 0.0, size), p(size, 0.0, size), p(size, size, size), p(0.0, size, size)],
            // Right
            [p(size, 0.0, 0.0), p(size, size, 0.0), p(size, size, size), p(size, 0.0, size)],
            // Left
            [p(0.0, 0.0, 0.0), p(0.0, 0.0, size), p(0.0, size, size), p(0.0, size, 0.0)],
            // Top
            [p(0.0, size, 0.0), p(0.0, size, size), p(size, size, size), p(size, size, 0.0)],
            // Bottom
            [p(0.0, 0.0, 0.0), p(size, 0.0, 0.0), p(size, 0.0, size), p(0.0, 0.0, size)],
        ];

        let mut triangles = Vec::with_capacity(12);
        for [a, b, c, d] in faces {
            triangles.push(Triangle::new(a, b, d)?);
            triangles.push(Triangle::new(b, c, d)?);
        }

        Ok(Self::new(triangles))
    }

    /// Shift every authored vertex by half the mesh extent on each axis.
    ///
    /// Note this subtracts `(max - min) / 2`, not the midpoint
    /// `(min + max) / 2`, so the result is only centered on axes where
    /// `min == 0` (as with [`Mesh::cube`]).
    pub fn center_origin(&mut self) {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let Some(first) = points.next() else {
            return;
        };

        let (min, max) = points.fold((first.coords, first.coords), |(min, max), v| {
            (min.inf(&v.coords), max.sup(&v.coords))
        });
        let shift = (max - min) / 2.0;

        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                *vertex -= shift;
            }
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
