//! Camera, backface culling and perspective projection

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::geometry::Triangle;
use crate::math::{dot, normalize};

/// Camera configuration for 3D rendering.
///
/// The camera sits at the world origin and `width`/`height` describe the
/// canvas in pixels. `fov` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fov: 90.0,
            near: 10.0,
            far: 400.0,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    /// Inverse tangent of half the field of view
    pub fn focal_scale(&self) -> f32 {
        1.0 / (self.fov / 2.0).to_radians().tan()
    }

    /// Cull the triangle if it faces away from the camera, otherwise
    /// project its transformed vertices to pixel coordinates in place.
    ///
    /// Returns the new visibility.
    pub fn project_triangle(&self, triangle: &mut Triangle) -> bool {
        let render = triangle.render_mut();

        // A degenerate direction (vertex at the camera) never compares > 0
        let visible = match normalize(&(Point3::origin() - render.vertices[0])) {
            Ok(to_camera) => dot(&render.normal, &to_camera) > 0.0,
            Err(_) => false,
        };

        render.visible = visible;
        if visible {
            for vertex in &mut render.vertices {
                self.project_vertex(vertex);
            }
        }
        visible
    }

    /// Map a camera-space point to pixel space, overwriting its z with the
    /// projected depth.
    pub fn project_vertex(&self, vertex: &mut Point3<f32>) {
        let width = self.width as f32;
        let height = self.height as f32;

        // Screen units to normalized units
        let x = vertex.x / width;
        let y = vertex.y / height;
        let z = vertex.z / (self.far - self.near);

        let f = self.focal_scale();
        let q = self.far / (self.far - self.near);

        let mut px = self.aspect() * f * x;
        let mut py = f * y;
        let pz = z * (q - q * self.near);

        if z != 0.0 {
            px /= z;
            py /= z;
        }

        // Back to pixels, centered on the canvas
        vertex.x = px * width + width / 2.0;
        vertex.y = py * height + height / 2.0;
        vertex.z = pz;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(400, 400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn facing(normal: Vector3<f32>, z: f32) -> Triangle {
        let mut triangle = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let render = triangle.render_mut();
        render.vertices = [
            Point3::new(0.0, 0.0, z),
            Point3::new(10.0, 0.0, z),
            Point3::new(0.0, 10.0, z),
        ];
        render.normal = normal;
        triangle
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!((camera.width, camera.height), (400, 400));
        assert!((camera.aspect() - 1.0).abs() < 1e-6);
        assert!((camera.focal_scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_is_height_over_width() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::default();
        let mut vertex = Point3::new(0.0, 0.0, 50.0);
        camera.project_vertex(&mut vertex);
        assert!((vertex.x - 200.0).abs() < 1e-4);
        assert!((vertex.y - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_projection_divides_by_depth() {
        let camera = Camera::default();
        let mut vertex = Point3::new(39.0, -39.0, 390.0);
        camera.project_vertex(&mut vertex);

        // normalized z is 1, so x/y are only scaled: 39/400 * 400 + 200
        assert!((vertex.x - 239.0).abs() < 1e-3);
        assert!((vertex.y - 161.0).abs() < 1e-3);
        let q = 400.0f32 / 390.0;
        assert!((vertex.z - (q - q * 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_depth_skips_divide() {
        let camera = Camera::default();
        let mut vertex = Point3::new(100.0, 40.0, 0.0);
        camera.project_vertex(&mut vertex);
        assert!((vertex.x - 300.0).abs() < 1e-4);
        assert!((vertex.y - 240.0).abs() < 1e-4);
        assert_eq!(vertex.z, 0.0);
    }

    #[test]
    fn test_backface_culled() {
        let camera = Camera::default();
        let mut triangle = facing(Vector3::new(0.0, 0.0, 1.0), 50.0);
        let before = triangle.render().vertices;

        assert!(!camera.project_triangle(&mut triangle));
        assert!(!triangle.render().visible);
        // Culled triangles are left unprojected
        assert_eq!(triangle.render().vertices, before);
    }

    #[test]
    fn test_front_face_visible_and_projected() {
        let camera = Camera::default();
        let mut triangle = facing(Vector3::new(0.0, 0.0, -1.0), 50.0);

        assert!(camera.project_triangle(&mut triangle));
        assert!(triangle.render().visible);
        let v0 = triangle.render().vertices[0];
        assert!((v0.x - 200.0).abs() < 1e-4);
        assert!((v0.y - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_on_triangle_culled() {
        let camera = Camera::default();
        let mut triangle = facing(Vector3::new(1.0, 0.0, 0.0), 50.0);
        assert!(!camera.project_triangle(&mut triangle));
    }

    #[test]
    fn test_vertex_at_camera_culled() {
        let camera = Camera::default();
        let mut triangle = facing(Vector3::new(0.0, 0.0, -1.0), 0.0);
        assert!(!camera.project_triangle(&mut triangle));
    }

    #[test]
    fn test_visibility_recomputed() {
        let camera = Camera::default();
        let mut triangle = facing(Vector3::new(0.0, 0.0, 1.0), 50.0);
        camera.project_triangle(&mut triangle);
        assert!(!triangle.render().visible);

        triangle.render_mut().normal = Vector3::new(0.0, 0.0, -1.0);
        camera.project_triangle(&mut triangle);
        assert!(triangle.render().visible);
    }
}
