//! SR3D Web - canvas 2D host for the software renderer
//!
//! The page owns the animation loop: it calls `WebRenderer::render` once per
//! `requestAnimationFrame` and hands fetched OBJ text to `load_obj`.

use sr3d_core::{load_obj, render_frame, Color, DrawSurface, Mesh, RenderConfig, Scene};
use std::io;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Degrees of spin applied to every mesh per frame
const SPIN: f32 = 0.6;

/// CSS color string with channels clamped to `0..=255`
fn css_rgb(color: Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("rgb({}, {}, {})", r, g, b)
}

/// Draws polygons onto a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    stroke: Option<Color>,
    stroke_weight: f32,
    path_started: bool,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
            stroke: None,
            stroke_weight: 0.0,
            path_started: false,
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, background: Color) {
        self.ctx.set_fill_style_str(&css_rgb(background));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn begin_polygon(&mut self) {
        self.ctx.begin_path();
        self.path_started = false;
    }

    fn vertex(&mut self, x: f32, y: f32) {
        if self.path_started {
            self.ctx.line_to(x as f64, y as f64);
        } else {
            self.ctx.move_to(x as f64, y as f64);
            self.path_started = true;
        }
    }

    fn end_polygon(&mut self) {
        self.ctx.close_path();
        self.ctx.fill();
        if self.stroke.is_some() && self.stroke_weight > 0.0 {
            self.ctx.stroke();
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&css_rgb(color));
    }

    fn set_stroke_color(&mut self, color: Option<Color>) {
        if let Some(color) = color {
            self.ctx.set_stroke_style_str(&css_rgb(color));
        }
        self.stroke = color;
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.ctx.set_line_width(weight as f64);
        self.stroke_weight = weight;
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: Scene,
    config: RenderConfig,
    surface: CanvasSurface,
    placement_depth: f32,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Bind to the `<canvas>` with the given id and size it to the camera
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let config = RenderConfig::default();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", canvas_id)))?;
        canvas.set_width(config.camera.width);
        canvas.set_height(config.camera.height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        Ok(WebRenderer {
            scene: Scene::new(),
            config,
            surface: CanvasSurface::new(ctx, config.camera.width, config.camera.height),
            placement_depth: 50.0,
        })
    }

    pub fn add_cube(&mut self, size: f32) -> Result<(), JsValue> {
        let mut cube = Mesh::cube(size).map_err(|e| JsValue::from_str(&e.to_string()))?;
        cube.position.z = self.placement_depth;
        self.scene.add(cube);
        Ok(())
    }

    /// Queue OBJ text fetched by the page; it joins the scene on the next frame
    pub fn load_obj(&mut self, label: String, text: String) {
        self.scene
            .spawn_load(label, load_obj(async move { Ok::<_, io::Error>(text) }));
    }

    /// Advance the animation and draw one frame. Returns the number of
    /// triangles drawn.
    pub fn render(&mut self) -> usize {
        let added = self.scene.poll_loads();
        for mesh in &mut self.scene.meshes_mut()[added] {
            mesh.position.z += self.placement_depth;
        }
        for mesh in self.scene.meshes_mut() {
            mesh.rotation.rotate(SPIN, SPIN, 0.0);
        }

        render_frame(&mut self.scene, &self.config, &mut self.surface).drawn
    }

    /// Update rotation state of every mesh (degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        for mesh in self.scene.meshes_mut() {
            mesh.rotation.rotate(dx, dy, dz);
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.scene.meshes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rgb_clamps() {
        assert_eq!(css_rgb(Color::gray(255.0)), "rgb(255, 255, 255)");
        assert_eq!(css_rgb(Color::new(-12.0, 300.0, 93.2)), "rgb(0, 255, 93)");
    }
}
