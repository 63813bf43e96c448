//! Pan/zoom transform between canvas space and screen space.
//!
//! A screen point is `canvas * zoom + pan`. Everything that turns pointer
//! positions into note coordinates goes through [`Camera::screen_to_canvas`].

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    /// Both components divided by `factor`.
    #[must_use]
    pub fn div(self, factor: f64) -> Point {
        Point::new(self.x / factor, self.y / factor)
    }
}

/// Width and height of a note, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are the screen-pixel translation.
/// `zoom` is a uniform scale factor (1.0 = no zoom), kept within
/// [`MIN_SCALE`, `MAX_SCALE`] by every mutator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

/// Clamp a scale factor to the allowed zoom range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_SCALE, MAX_SCALE)
}

impl Camera {
    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Translate by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the zoom by `factor` while keeping the canvas point under
    /// `screen` fixed on screen.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        self.set_zoom_at(screen, self.zoom * factor);
    }

    /// Set the zoom (clamped) while keeping the canvas point under `screen`
    /// fixed on screen.
    pub fn set_zoom_at(&mut self, screen: Point, zoom: f64) {
        let new_zoom = clamp_zoom(zoom);
        let ratio = new_zoom / self.zoom;
        self.pan_x = screen.x - (screen.x - self.pan_x) * ratio;
        self.pan_y = screen.y - (screen.y - self.pan_y) * ratio;
        self.zoom = new_zoom;
    }
}
