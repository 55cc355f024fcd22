//! Axis-aligned rectangle geometry for entity footprints
//!
//! Every collision in the game is a strict AABB overlap test: boxes that only
//! share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: pos,
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes (`a < b + h && a + H > b`)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}
