//! Pixel-frame bounding boxes

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates (x1, y1, x2, y2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box width, clamped to zero for degenerate input
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    /// Box height, clamped to zero for degenerate input
    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    /// Horizontal center of the box
    pub fn center_x(&self) -> f32 {
        (self.x1 + self.x2) as f32 / 2.0
    }

    /// Shift the box by an offset, e.g. from crop-local back to full-image
    /// coordinates.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    /// Intersect the box with a `width` x `height` frame anchored at the
    /// origin. Returns `None` when nothing remains.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        let clamped = Self {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(width as i32),
            y2: self.y2.min(height as i32),
        };
        if clamped.x2 > clamped.x1 && clamped.y2 > clamped.y1 {
            Some(clamped)
        } else {
            None
        }
    }
}
