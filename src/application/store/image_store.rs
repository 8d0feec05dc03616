//! Single-queue state container.

use tokio::sync::watch;
use tracing::debug;

use crate::domain::entities::{Image, ImageId};

use super::reducer::{ImageAction, reduce};
use super::state::ImageState;

/// Holds [`ImageState`] and applies dispatched actions one at a time.
///
/// Every update runs through the reducer inside a single `send_modify`, so each
/// completed operation lands atomically and observers see whole transitions.
#[derive(Debug)]
pub struct ImageStore {
    state: watch::Sender<ImageState>,
}

impl ImageStore {
    /// Creates a store with the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(ImageState::default())
    }

    /// Creates a store from an existing state.
    #[must_use]
    pub fn with_state(state: ImageState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { state: tx }
    }

    /// Applies `action` and notifies subscribers.
    pub fn dispatch(&self, action: ImageAction) {
        self.state.send_modify(|state| reduce(state, action));
        debug!(saved = self.state.borrow().saved_images.len(), "Store updated");
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ImageState {
        self.state.borrow().clone()
    }

    /// Returns the saved images.
    #[must_use]
    pub fn saved_images(&self) -> Vec<Image> {
        self.state.borrow().saved_images.clone()
    }

    /// Finds a saved image by id.
    #[must_use]
    pub fn find(&self, id: &ImageId) -> Option<Image> {
        self.state.borrow().find(id).cloned()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ImageState> {
        self.state.subscribe()
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}
