//! Saved image state tracked by the store.

use crate::domain::entities::{Image, ImageId};

/// Lifecycle of one user-facing operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationStatus {
    /// Never run, or explicitly reset.
    #[default]
    Idle,
    /// Running.
    Pending,
    /// Last run completed.
    Succeeded,
    /// Last run failed.
    Failed,
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Operations with independently tracked status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Save one image.
    Save,
    /// Delete one image.
    Delete,
    /// Delete every image.
    ClearAll,
    /// Load the saved set.
    List,
}

impl Operation {
    /// Every tracked operation.
    pub const ALL: [Self; 4] = [Self::Save, Self::Delete, Self::ClearAll, Self::List];

    /// Message recorded when a failure carries no message of its own.
    #[must_use]
    pub const fn default_error_message(self) -> &'static str {
        match self {
            Self::Save => "Failed to save image",
            Self::Delete => "Failed to delete image",
            Self::ClearAll => "Failed to clear images",
            Self::List => "Failed to list images",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Save => write!(f, "save"),
            Self::Delete => write!(f, "delete"),
            Self::ClearAll => write!(f, "clearAll"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Status and last error of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSlot {
    /// Current status.
    pub status: OperationStatus,
    /// Last error message, cleared when the operation starts again.
    pub error: Option<String>,
}

/// Complete store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    /// Saved images, unique by id, in save order.
    pub saved_images: Vec<Image>,
    save: OperationSlot,
    delete: OperationSlot,
    clear_all: OperationSlot,
    list: OperationSlot,
}

impl ImageState {
    /// Returns the slot for `op`.
    #[must_use]
    pub const fn slot(&self, op: Operation) -> &OperationSlot {
        match op {
            Operation::Save => &self.save,
            Operation::Delete => &self.delete,
            Operation::ClearAll => &self.clear_all,
            Operation::List => &self.list,
        }
    }

    pub(crate) fn slot_mut(&mut self, op: Operation) -> &mut OperationSlot {
        match op {
            Operation::Save => &mut self.save,
            Operation::Delete => &mut self.delete,
            Operation::ClearAll => &mut self.clear_all,
            Operation::List => &mut self.list,
        }
    }

    /// Returns the status of `op`.
    #[must_use]
    pub const fn status(&self, op: Operation) -> OperationStatus {
        self.slot(op).status
    }

    /// Returns the last error of `op`.
    #[must_use]
    pub fn error(&self, op: Operation) -> Option<&str> {
        self.slot(op).error.as_deref()
    }

    /// Returns true if `op` is running.
    #[must_use]
    pub fn is_pending(&self, op: Operation) -> bool {
        self.status(op) == OperationStatus::Pending
    }

    /// Finds a saved image by id.
    #[must_use]
    pub fn find(&self, id: &ImageId) -> Option<&Image> {
        self.saved_images.iter().find(|image| &image.id == id)
    }

    /// Returns true if an image with `id` is saved.
    #[must_use]
    pub fn contains(&self, id: &ImageId) -> bool {
        self.find(id).is_some()
    }
}
