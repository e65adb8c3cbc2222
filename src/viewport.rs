//! Logical screen dimensions shared by every component that needs bounds.
//!
//! Sizes and speeds are authored against an 800×600 reference screen and
//! scaled to the current viewport with [`ViewportConfig::scale_x`] /
//! [`ViewportConfig::scale_y`].

pub const REFERENCE_WIDTH: i32 = 800;
pub const REFERENCE_HEIGHT: i32 = 600;

/// Smallest viewport a resize may shrink to.
pub const MIN_WIDTH: i32 = 400;
pub const MIN_HEIGHT: i32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

impl ViewportConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }

    /// Update the dimensions in place (window/terminal resize).
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Scale a horizontal reference value, truncating toward zero.
    pub fn scale_x(&self, value: i32) -> i32 {
        (value as f32 * self.width as f32 / REFERENCE_WIDTH as f32) as i32
    }

    /// Scale a vertical reference value, truncating toward zero.
    pub fn scale_y(&self, value: i32) -> i32 {
        (value as f32 * self.height as f32 / REFERENCE_HEIGHT as f32) as i32
    }
}
