//! Per-item visual geometry
//!
//! Offsets are measured from the vertical center of the carousel region,
//! negative values move an item upwards.

use serde::{Deserialize, Serialize};

/// Width/height pair in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half of the height, used for edge-to-edge offset accumulation
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// The displayed (or target) visual state of one item
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Vertical offset of the item's center
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    /// Stacking order, higher draws on top
    pub stack_depth: i32,
}

impl Geometry {
    /// Create geometry centered at `y_offset` with the given size
    pub fn new(y_offset: f32, size: Size, opacity: f32, stack_depth: i32) -> Self {
        Self {
            y_offset,
            width: size.width,
            height: size.height,
            opacity,
            stack_depth,
        }
    }

    /// Size portion of the geometry
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Top edge (smallest y)
    pub fn top(&self) -> f32 {
        self.y_offset - self.height / 2.0
    }

    /// Bottom edge (largest y)
    pub fn bottom(&self) -> f32 {
        self.y_offset + self.height / 2.0
    }

    /// True when nothing of the item is visible
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0 || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Metrics of the viewport hosting the carousel
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
}

impl ViewportMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}
