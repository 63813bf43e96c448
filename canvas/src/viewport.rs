//! Visible viewport geometry.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Point};
use crate::consts::TOP_BAR_HEIGHT_PX;

/// Dimensions of the visible window the canvas is drawn into.
///
/// `top_offset` is the height of fixed chrome (the top bar) that overlaps
/// the canvas; the usable area starts below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub top_offset: f64,
}

impl Viewport {
    /// A viewport of the given window size with the default top bar.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, top_offset: TOP_BAR_HEIGHT_PX }
    }

    /// Screen-space center of the area below the top bar.
    #[must_use]
    pub fn center_screen(&self) -> Point {
        let usable_height = self.height - self.top_offset;
        Point::new(self.width / 2.0, usable_height / 2.0 + self.top_offset)
    }

    /// Canvas-space point currently displayed at the center of the usable area.
    #[must_use]
    pub fn center_canvas(&self, camera: &Camera) -> Point {
        camera.screen_to_canvas(self.center_screen())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
