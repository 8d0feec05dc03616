//! Actions and the reducer that applies them.

use tracing::trace;

use crate::domain::entities::{Image, ImageId};

use super::state::{ImageState, Operation, OperationStatus};

/// State transitions dispatched to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAction {
    /// An operation started.
    Pending(Operation),
    /// An operation failed.
    Rejected {
        /// Failed operation.
        op: Operation,
        /// Failure message, if one is available.
        message: Option<String>,
    },
    /// Save completed with the persisted image.
    SaveFulfilled(Image),
    /// Delete completed for this id.
    DeleteFulfilled(ImageId),
    /// Clear-all completed.
    ClearAllFulfilled,
    /// List completed with the full saved set.
    ListFulfilled(Vec<Image>),
    /// Clears the error of one operation.
    ClearError(Operation),
    /// Clears every operation error.
    ClearAllErrors,
    /// Returns one operation to idle.
    ResetOperationStatus(Operation),
}

/// Applies `action` to `state`.
pub fn reduce(state: &mut ImageState, action: ImageAction) {
    trace!(?action, "Reducing image action");

    match action {
        ImageAction::Pending(op) => {
            let slot = state.slot_mut(op);
            slot.status = OperationStatus::Pending;
            slot.error = None;
        }
        ImageAction::Rejected { op, message } => {
            let slot = state.slot_mut(op);
            slot.status = OperationStatus::Failed;
            slot.error = Some(
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| op.default_error_message().to_string()),
            );
        }
        ImageAction::SaveFulfilled(image) => {
            state.slot_mut(Operation::Save).status = OperationStatus::Succeeded;
            if let Some(existing) = state.saved_images.iter_mut().find(|i| i.id == image.id) {
                *existing = image;
            } else {
                state.saved_images.push(image);
            }
        }
        ImageAction::DeleteFulfilled(id) => {
            state.slot_mut(Operation::Delete).status = OperationStatus::Succeeded;
            state.saved_images.retain(|image| image.id != id);
        }
        ImageAction::ClearAllFulfilled => {
            state.slot_mut(Operation::ClearAll).status = OperationStatus::Succeeded;
            state.saved_images.clear();
        }
        ImageAction::ListFulfilled(images) => {
            state.slot_mut(Operation::List).status = OperationStatus::Succeeded;
            state.saved_images = images;
        }
        ImageAction::ClearError(op) => {
            state.slot_mut(op).error = None;
        }
        ImageAction::ClearAllErrors => {
            for op in Operation::ALL {
                state.slot_mut(op).error = None;
            }
        }
        ImageAction::ResetOperationStatus(op) => {
            let slot = state.slot_mut(op);
            slot.status = OperationStatus::Idle;
            slot.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str) -> Image {
        Image::new(id, format!("https://x/{id}.png"), "Alice", 1, 1)
    }

    fn apply(state: &mut ImageState, actions: Vec<ImageAction>) {
        for action in actions {
            reduce(state, action);
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = ImageState::default();
        for op in Operation::ALL {
            assert_eq!(state.status(op), OperationStatus::Idle);
            assert_eq!(state.error(op), None);
        }
        assert!(state.saved_images.is_empty());
    }

    #[test]
    fn test_pending_clears_previous_error() {
        let mut state = ImageState::default();
        apply(
            &mut state,
            vec![
                ImageAction::Rejected {
                    op: Operation::Save,
                    message: Some("disk full".to_string()),
                },
                ImageAction::Pending(Operation::Save),
            ],
        );

        assert!(state.is_pending(Operation::Save));
        assert_eq!(state.error(Operation::Save), None);
    }

    #[test]
    fn test_save_appends_and_replaces_same_id() {
        let mut state = ImageState::default();
        let enriched = image("a1").with_local_path("/docs/images/a1.png");
        apply(
            &mut state,
            vec![
                ImageAction::Pending(Operation::Save),
                ImageAction::SaveFulfilled(image("a1")),
                ImageAction::SaveFulfilled(image("b2")),
                ImageAction::SaveFulfilled(enriched.clone()),
            ],
        );

        assert_eq!(state.status(Operation::Save), OperationStatus::Succeeded);
        assert_eq!(state.saved_images, vec![enriched, image("b2")]);
    }

    #[test]
    fn test_delete_removes_by_id() {
        let mut state = ImageState::default();
        apply(
            &mut state,
            vec![
                ImageAction::ListFulfilled(vec![image("a1"), image("b2")]),
                ImageAction::Pending(Operation::Delete),
                ImageAction::DeleteFulfilled(ImageId::new("a1")),
            ],
        );

        assert_eq!(state.status(Operation::Delete), OperationStatus::Succeeded);
        assert!(!state.contains(&ImageId::new("a1")));
        assert!(state.contains(&ImageId::new("b2")));
    }

    #[test]
    fn test_clear_all_and_list() {
        let mut state = ImageState::default();
        apply(
            &mut state,
            vec![
                ImageAction::ListFulfilled(vec![image("a1"), image("b2")]),
                ImageAction::ClearAllFulfilled,
            ],
        );

        assert_eq!(state.status(Operation::List), OperationStatus::Succeeded);
        assert_eq!(state.status(Operation::ClearAll), OperationStatus::Succeeded);
        assert!(state.saved_images.is_empty());
    }

    #[test]
    fn test_rejected_uses_default_message() {
        let mut state = ImageState::default();
        apply(
            &mut state,
            vec![
                ImageAction::Rejected {
                    op: Operation::Delete,
                    message: None,
                },
                ImageAction::Rejected {
                    op: Operation::List,
                    message: Some(String::new()),
                },
            ],
        );

        assert_eq!(state.status(Operation::Delete), OperationStatus::Failed);
        assert_eq!(state.error(Operation::Delete), Some("Failed to delete image"));
        assert_eq!(state.error(Operation::List), Some("Failed to list images"));
    }

    #[test]
    fn test_clear_errors_keep_status() {
        let mut state = ImageState::default();
        let fail = |op| ImageAction::Rejected {
            op,
            message: Some("boom".to_string()),
        };
        apply(
            &mut state,
            vec![
                fail(Operation::Save),
                fail(Operation::Delete),
                ImageAction::ClearError(Operation::Save),
            ],
        );
        assert_eq!(state.error(Operation::Save), None);
        assert_eq!(state.error(Operation::Delete), Some("boom"));

        reduce(&mut state, ImageAction::ClearAllErrors);
        assert_eq!(state.error(Operation::Delete), None);
        assert_eq!(state.status(Operation::Delete), OperationStatus::Failed);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut state = ImageState::default();
        apply(
            &mut state,
            vec![
                ImageAction::Rejected {
                    op: Operation::ClearAll,
                    message: Some("boom".to_string()),
                },
                ImageAction::ResetOperationStatus(Operation::ClearAll),
            ],
        );

        assert_eq!(state.status(Operation::ClearAll), OperationStatus::Idle);
        assert_eq!(state.error(Operation::ClearAll), None);
    }
}
