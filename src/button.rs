//! The two on-screen buttons that launch and reset the flight.

use crate::{app::Display, config::ButtonLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Launch,
    Reset,
}

/// Axis-aligned rectangle in window pixels, origin at the top-left corner.
/// Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PixelRect {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

#[derive(Debug, Clone)]
pub struct ButtonPanel {
    layout: ButtonLayout,
}

impl ButtonPanel {
    pub fn new(layout: ButtonLayout) -> Self {
        Self { layout }
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ButtonAction> {
        if self.layout.launch.contains(x, y) {
            Some(ButtonAction::Launch)
        } else if self.layout.reset.contains(x, y) {
            Some(ButtonAction::Reset)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ButtonVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}
implement_vertex!(ButtonVertex, position, color);

const LAUNCH_COLOR: [f32; 3] = [0.1, 0.1, 0.0];
const RESET_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Two triangles covering `[x0, x1] x [y0, y1]` in normalized device coordinates.
fn quad(x0: f32, x1: f32, y0: f32, y1: f32, color: [f32; 3]) -> [ButtonVertex; 6] {
    [
        [x0, y0],
        [x0, y1],
        [x1, y1],
        [x1, y1],
        [x1, y0],
        [x0, y0],
    ]
    .map(|position| ButtonVertex { position, color })
}

pub fn button_vertices() -> Vec<ButtonVertex> {
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(quad(-0.3, -0.1, -0.9, -0.7, LAUNCH_COLOR));
    vertices.extend(quad(0.1, 0.3, -0.9, -0.7, RESET_COLOR));
    vertices
}

pub fn button_vertex_buffer(
    display: &Display,
) -> Result<glium::VertexBuffer<ButtonVertex>, glium::vertex::BufferCreationError> {
    glium::VertexBuffer::new(display, &button_vertices())
}
