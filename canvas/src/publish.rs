//! Explicit camera change notification.
//!
//! Components that need the live camera (viewport-center queries, gesture
//! controllers, overlays) register a callback here instead of listening for
//! ambient events. Callbacks run synchronously, in subscription order, after
//! every camera mutation.

#[cfg(test)]
#[path = "publish_test.rs"]
mod publish_test;

use crate::camera::Camera;

/// Handle returned by [`CameraPublisher::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Camera)>;

/// Typed publisher of camera snapshots.
#[derive(Default)]
pub struct CameraPublisher {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl CameraPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It is not called until the next publish.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Camera) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Deliver a snapshot to every listener.
    pub fn publish(&mut self, camera: &Camera) {
        for (_, listener) in &mut self.listeners {
            listener(camera);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for CameraPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraPublisher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
