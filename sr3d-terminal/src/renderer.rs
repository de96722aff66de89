//! ASCII drawing surface for terminal rendering

use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use sr3d_core::{Color, DrawSurface};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const STROKE_CHAR: char = 'o';

/// Height of a terminal cell over its width
const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<[u8; 3]>,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: None,
};

/// Terminal character grid that accepts canvas-space polygons.
///
/// The canvas is scaled onto the largest centered region of the grid that
/// keeps its aspect once cell shape is accounted for. There is no depth
/// buffer: later polygons overwrite earlier ones, so callers submit them
/// back to front.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    canvas_width: f32,
    canvas_height: f32,
    cell_aspect: f32,
    cells: Vec<Cell>,
    background: [u8; 3],
    fill: Color,
    stroke: Option<Color>,
    stroke_weight: f32,
    polygon: Vec<(f32, f32)>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            width,
            height,
            canvas_width: canvas_width as f32,
            canvas_height: canvas_height as f32,
            cell_aspect: CELL_ASPECT,
            cells: vec![BLANK; width * height],
            background: [0, 0, 0],
            fill: Color::gray(255.0),
            stroke: None,
            stroke_weight: 0.0,
            polygon: Vec::new(),
        }
    }

    /// Override the cell height-to-width ratio used for letterboxing
    pub fn with_cell_aspect(mut self, cell_aspect: f32) -> Self {
        self.cell_aspect = cell_aspect;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width * height];
    }

    /// Character at a grid cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].ch)
        } else {
            None
        }
    }

    fn to_grid(&self, x: f32, y: f32) -> (f32, f32) {
        let (width, height) = (self.width as f32, self.height as f32);

        // Columns per canvas pixel; rows are taller by the cell aspect
        let scale_x = (width / self.canvas_width).min(height * self.cell_aspect / self.canvas_height);
        let scale_y = scale_x / self.cell_aspect;

        let offset_x = (width - self.canvas_width * scale_x) / 2.0;
        let offset_y = (height - self.canvas_height * scale_y) / 2.0;
        (offset_x + x * scale_x, offset_y + y * scale_y)
    }

    fn plot(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.cells[idx] = cell;
        }
    }

    fn fill_cell(&self) -> Cell {
        let [r, g, b] = self.fill.to_rgb8();
        let brightness = (r as f32 + g as f32 + b as f32) / (3.0 * 255.0);
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        Cell {
            ch: LUMINOSITY_RAMP[char_index],
            color: Some([r, g, b]),
        }
    }

    fn rasterize_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), cell: Cell) {
        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    // Either winding
                    let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                        || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                    if inside {
                        self.plot(x, y, cell);
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), cell: Cell) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).floor() as i32;
            let y = (from.1 + dy * t).floor() as i32;
            self.plot(x, y, cell);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let [br, bg, bb] = self.background;
        writer.queue(SetBackgroundColor(TermColor::Rgb {
            r: br,
            g: bg,
            b: bb,
        }))?;

        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if cell.color.is_some() && cell.color != current {
                    if let Some([r, g, b]) = cell.color {
                        writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                    }
                    current = cell.color;
                }
                writer.queue(Print(cell.ch))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for AsciiSurface {
    fn clear(&mut self, background: Color) {
        self.background = background.to_rgb8();
        self.cells.fill(BLANK);
    }

    fn begin_polygon(&mut self) {
        self.polygon.clear();
    }

    fn vertex(&mut self, x: f32, y: f32) {
        let point = self.to_grid(x, y);
        self.polygon.push(point);
    }

    fn end_polygon(&mut self) {
        let polygon = std::mem::take(&mut self.polygon);

        if polygon.len() >= 3 {
            let cell = self.fill_cell();
            for i in 1..polygon.len() - 1 {
                self.rasterize_triangle(polygon[0], polygon[i], polygon[i + 1], cell);
            }
        }

        // Outlines are one cell wide whatever the weight
        if let Some(stroke) = self.stroke.filter(|_| self.stroke_weight > 0.0) {
            let cell = Cell {
                ch: STROKE_CHAR,
                color: Some(stroke.to_rgb8()),
            };
            for (i, &from) in polygon.iter().enumerate() {
                let to = polygon[(i + 1) % polygon.len()];
                self.draw_line(from, to, cell);
            }
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Option<Color>) {
        self.stroke = color;
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.stroke_weight = weight;
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
