use glam::{Vec2, Vec3};

use crate::app::Display;

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}
implement_vertex!(Vertex, position, color, normal);

#[derive(Debug, Clone, Copy)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}
implement_vertex!(TexturedVertex, position, color, normal, tex_coords);

/// Unindexed triangle list stored as parallel attribute arrays.
///
/// Every three consecutive vertices form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleMesh {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SimpleMesh {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
        }
    }

    pub fn push_vertex(&mut self, position: Vec3, color: Vec3, normal: Vec3) {
        self.positions.push(position);
        self.colors.push(color);
        self.normals.push(normal);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_well_formed(&self) -> bool {
        self.positions.len() == self.colors.len()
            && self.positions.len() == self.normals.len()
            && self.positions.len() % 3 == 0
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.normals)
            .map(|((position, color), normal)| Vertex {
                position: position.to_array(),
                color: color.to_array(),
                normal: normal.to_array(),
            })
            .collect()
    }

    pub fn vertex_buffer(
        &self,
        display: &Display,
    ) -> Result<glium::VertexBuffer<Vertex>, glium::vertex::BufferCreationError> {
        glium::VertexBuffer::new(display, &self.vertices())
    }
}

/// Appends `b` to `a`. The result owns copies of both; vertex order is `a` then `b`.
pub fn concatenate(mut a: SimpleMesh, b: &SimpleMesh) -> SimpleMesh {
    debug_assert!(a.is_well_formed() && b.is_well_formed());
    if b.is_empty() {
        return a;
    }

    a.positions.extend_from_slice(&b.positions);
    a.colors.extend_from_slice(&b.colors);
    a.normals.extend_from_slice(&b.normals);
    a
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TexturedMesh {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
}

impl TexturedMesh {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_well_formed(&self) -> bool {
        let len = self.positions.len();
        self.colors.len() == len
            && self.normals.len() == len
            && self.tex_coords.len() == len
            && len % 3 == 0
    }

    pub fn vertex_buffer(
        &self,
        display: &Display,
    ) -> Result<glium::VertexBuffer<TexturedVertex>, glium::vertex::BufferCreationError> {
        let vertices = self
            .positions
            .iter()
            .zip(&self.colors)
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|(((position, color), normal), tex_coords)| TexturedVertex {
                position: position.to_array(),
                color: color.to_array(),
                normal: normal.to_array(),
                tex_coords: tex_coords.to_array(),
            })
            .collect::<Vec<_>>();

        glium::VertexBuffer::new(display, &vertices)
    }
}
