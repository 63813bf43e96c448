//! Pan/zoom controller: owns the camera and mutates it from pointer and wheel input.
//!
//! Two states, [`PanState::Idle`] and [`PanState::Panning`]. A pointer-down on
//! the background starts a pan; pointer-up or leaving the tracked surface ends
//! it. Wheel events zoom about the cursor in either state. Every camera change
//! is published synchronously to subscribers before the handler returns.

#[cfg(test)]
#[path = "pan_zoom_test.rs"]
mod pan_zoom_test;

use crate::camera::{Camera, Point};
use crate::consts::{WHEEL_ZOOM_IN_FACTOR, WHEEL_ZOOM_OUT_FACTOR};
use crate::input::{PanState, PointerTarget, WheelDelta};
use crate::publish::{CameraPublisher, SubscriptionId};
use crate::viewport::Viewport;

#[derive(Debug, Default)]
pub struct PanZoomController {
    camera: Camera,
    state: PanState,
    viewport: Viewport,
    publisher: CameraPublisher,
}

impl PanZoomController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the identity camera and announce it. Called when the canvas mounts.
    pub fn mount(&mut self) {
        self.camera = Camera::default();
        self.state = PanState::Idle;
        self.publisher.publish(&self.camera);
    }

    // --- Queries ---

    /// Snapshot of the current camera.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn state(&self) -> PanState {
        self.state
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Canvas point currently at the center of the visible area.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        self.viewport.center_canvas(&self.camera)
    }

    // --- Subscriptions ---

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Camera) + 'static,
    {
        self.publisher.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    // --- Inputs ---

    /// Update the visible window dimensions.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Begin panning if the pointer went down on the background.
    /// Returns true if a pan started.
    pub fn on_pointer_down(&mut self, screen: Point, target: PointerTarget) -> bool {
        if target != PointerTarget::Background {
            return false;
        }
        self.state = PanState::Panning { last_screen: screen };
        true
    }

    /// Translate by the movement since the previous event while panning.
    /// Returns true if the camera changed.
    pub fn on_pointer_move(&mut self, screen: Point) -> bool {
        let PanState::Panning { last_screen } = self.state else {
            return false;
        };
        let delta = screen.sub(last_screen);
        self.state = PanState::Panning { last_screen: screen };
        self.camera.pan_by(delta.x, delta.y);
        self.publisher.publish(&self.camera);
        true
    }

    /// End any pan in progress.
    pub fn on_pointer_up(&mut self) {
        self.state = PanState::Idle;
    }

    /// The pointer left the tracked surface; ends any pan in progress.
    pub fn on_pointer_leave(&mut self) {
        self.state = PanState::Idle;
    }

    /// Zoom about `screen` (relative to the canvas container). Scrolling down
    /// zooms out, scrolling up zooms in; a zero vertical delta is ignored.
    /// Returns true if the camera was updated.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> bool {
        let factor = if delta.dy > 0.0 {
            WHEEL_ZOOM_OUT_FACTOR
        } else if delta.dy < 0.0 {
            WHEEL_ZOOM_IN_FACTOR
        } else {
            // Horizontal-only scroll does not zoom.
            return false;
        };
        self.camera.zoom_at(screen, factor);
        self.publisher.publish(&self.camera);
        true
    }
}
