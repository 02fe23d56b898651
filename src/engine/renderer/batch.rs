// CPU-side list of coloured quads for one frame

use super::Vertex;
use crate::core::math::Rect;
use glam::{Vec2, Vec4};

/// Quads collected during a frame and uploaded in one draw
#[derive(Debug, Default, Clone)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filled rectangle
    pub fn push_rect(&mut self, rect: Rect, color: Vec4) {
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return;
        }
        let base = self.vertices.len() as u32;
        let min = rect.min;
        let max = rect.max();

        // Clockwise on screen is counter-clockwise once y is flipped
        self.vertices.extend_from_slice(&[
            Vertex::new(Vec2::new(min.x, min.y), color),
            Vertex::new(Vec2::new(min.x, max.y), color),
            Vertex::new(Vec2::new(max.x, max.y), color),
            Vertex::new(Vec2::new(max.x, min.y), color),
        ]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Add a rectangle outline drawn inside `rect`
    pub fn push_outline(&mut self, rect: Rect, thickness: f32, color: Vec4) {
        let t = thickness.min(rect.size.x / 2.0).min(rect.size.y / 2.0);
        if t <= 0.0 {
            return;
        }
        let min = rect.min;
        let size = rect.size;
        self.push_rect(Rect::new(min.x, min.y, size.x, t), color);
        self.push_rect(Rect::new(min.x, min.y + size.y - t, size.x, t), color);
        self.push_rect(Rect::new(min.x, min.y + t, t, size.y - t * 2.0), color);
        self.push_rect(
            Rect::new(min.x + size.x - t, min.y + t, t, size.y - t * 2.0),
            color,
        );
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}
