//! Painter's-order sorting, flat shading and the per-frame pipeline

use nalgebra::Vector3;
use tracing::trace;

use crate::config::{Color, RenderConfig};
use crate::geometry::{Mesh, Triangle};
use crate::math::dot;
use crate::scene::Scene;

/// A 2D immediate-mode drawing target.
///
/// Coordinates are pixels with the origin at the top left. Colors are
/// passed through unclamped; each surface decides how to map channels
/// outside `0..=255`.
pub trait DrawSurface {
    fn clear(&mut self, background: Color);
    fn begin_polygon(&mut self);
    fn vertex(&mut self, x: f32, y: f32);
    /// Close and paint the polygon opened by `begin_polygon`.
    fn end_polygon(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Option<Color>);
    fn set_stroke_weight(&mut self, weight: f32);
}

/// Counters for a single rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub triangles: usize,
    pub drawn: usize,
}

/// Mean projected depth of a triangle.
///
/// Read after projection, so this is the projected z rather than the
/// camera-space distance.
pub fn depth_key(triangle: &Triangle) -> f32 {
    let [a, b, c] = triangle.render().vertices;
    (a.z + b.z + c.z) / 3.0
}

/// Visible triangles of `mesh` in draw order: ascending depth key, so
/// larger keys are painted last.
pub fn painter_order(mesh: &Mesh) -> Vec<&Triangle> {
    let mut visible: Vec<&Triangle> = mesh
        .triangles()
        .iter()
        .filter(|t| t.render().visible)
        .collect();
    visible.sort_by(|a, b| depth_key(a).total_cmp(&depth_key(b)));
    visible
}

/// Lambert term between the light direction and the transformed normal,
/// not clamped.
pub fn light_intensity(light: &Vector3<f32>, triangle: &Triangle) -> f32 {
    dot(light, &triangle.render().normal)
}

pub fn shade(light: &Vector3<f32>, triangle: &Triangle) -> Color {
    Color::gray(255.0 * light_intensity(light, triangle))
}

/// Emit one projected triangle. Surface y grows downwards, so the
/// projected y is flipped against the canvas height.
pub fn draw_triangle<S: DrawSurface + ?Sized>(
    surface: &mut S,
    config: &RenderConfig,
    triangle: &Triangle,
) {
    let height = config.camera.height as f32;

    surface.set_fill_color(shade(&config.light(), triangle));
    surface.set_stroke_color(config.style.stroke);
    surface.set_stroke_weight(config.style.stroke_weight);

    surface.begin_polygon();
    for v in &triangle.render().vertices {
        surface.vertex(v.x, height - v.y);
    }
    surface.end_polygon();
}

/// Transform, cull, project, sort and draw a single mesh
pub fn render_mesh<S: DrawSurface + ?Sized>(
    mesh: &mut Mesh,
    config: &RenderConfig,
    surface: &mut S,
) -> usize {
    mesh.apply_transformations();
    for triangle in mesh.triangles_mut() {
        config.camera.project_triangle(triangle);
    }

    let order = painter_order(mesh);
    for triangle in &order {
        draw_triangle(surface, config, triangle);
    }
    order.len()
}

/// Render every mesh of the scene onto `surface`.
///
/// An empty scene produces a cleared frame.
pub fn render_frame<S: DrawSurface + ?Sized>(
    scene: &mut Scene,
    config: &RenderConfig,
    surface: &mut S,
) -> FrameStats {
    surface.clear(config.style.background);

    let mut stats = FrameStats::default();
    for mesh in scene.meshes_mut() {
        stats.meshes += 1;
        stats.triangles += mesh.len();
        stats.drawn += render_mesh(mesh, config, surface);
    }

    trace!(
        meshes = stats.meshes,
        triangles = stats.triangles,
        drawn = stats.drawn,
        "frame rendered"
    );
    stats
}
