//! Store-backed image operations.
//!
//! Each operation marks itself pending, runs its use case and records the outcome
//! in the [`ImageStore`]. Successful deletes and clears then hand the affected local
//! files to the cleanup worker.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::{CleanupJob, CleanupQueue, LocalDeletion, LocalImageCache};
use crate::application::store::{ImageAction, ImageStore, Operation};
use crate::application::use_cases::{
    ClearAllImagesUseCase, DeleteImageUseCase, ListSavedImagesUseCase, SaveImageUseCase,
};
use crate::domain::entities::{Image, ImageId, ImagePage, ImageQuery};
use crate::domain::errors::ImageError;
use crate::domain::ports::{ImageRepositoryPort, RemoteImagePort};

/// Entry point used by front ends to browse, save and delete images.
#[derive(Clone)]
pub struct ImageOperations {
    store: Arc<ImageStore>,
    cache: Arc<LocalImageCache>,
    remote: Arc<dyn RemoteImagePort>,
    save_use_case: SaveImageUseCase,
    delete_use_case: DeleteImageUseCase,
    clear_all_use_case: ClearAllImagesUseCase,
    list_use_case: ListSavedImagesUseCase,
    cleanup: CleanupQueue,
}

impl std::fmt::Debug for ImageOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageOperations")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ImageOperations {
    /// Wires the use cases around a shared repository and cache.
    #[must_use]
    pub fn new(
        store: Arc<ImageStore>,
        repository: Arc<dyn ImageRepositoryPort>,
        cache: Arc<LocalImageCache>,
        remote: Arc<dyn RemoteImagePort>,
        cleanup: CleanupQueue,
    ) -> Self {
        Self {
            save_use_case: SaveImageUseCase::new(repository.clone(), cache.clone()),
            delete_use_case: DeleteImageUseCase::new(repository.clone()),
            clear_all_use_case: ClearAllImagesUseCase::new(repository.clone()),
            list_use_case: ListSavedImagesUseCase::new(repository),
            store,
            cache,
            remote,
            cleanup,
        }
    }

    /// Returns the state container.
    #[must_use]
    pub fn store(&self) -> &Arc<ImageStore> {
        &self.store
    }

    /// Returns true if an image with `id` is in the saved set.
    #[must_use]
    pub fn is_saved(&self, id: &ImageId) -> bool {
        self.store.find(id).is_some()
    }

    /// Saves an image and appends the persisted entry to the saved set.
    ///
    /// # Errors
    /// Returns `InvalidImage` or `CriticalSaveFailure` from the save use case.
    pub async fn save(&self, image: Image) -> Result<Image, ImageError> {
        self.store.dispatch(ImageAction::Pending(Operation::Save));

        match self.save_use_case.execute(image).await {
            Ok(saved) => {
                self.store.dispatch(ImageAction::SaveFulfilled(saved.clone()));
                Ok(saved)
            }
            Err(e) => Err(self.reject(Operation::Save, e)),
        }
    }

    /// Deletes a saved image and schedules removal of its local copy.
    ///
    /// # Errors
    /// Returns the delete use case error; nothing is scheduled in that case.
    pub async fn delete(&self, id: &ImageId) -> Result<(), ImageError> {
        self.store.dispatch(ImageAction::Pending(Operation::Delete));

        if let Err(e) = self.delete_use_case.execute(id).await {
            return Err(self.reject(Operation::Delete, e));
        }

        let local_path = self
            .store
            .find(id)
            .and_then(|image| image.local_path);
        self.store.dispatch(ImageAction::DeleteFulfilled(id.clone()));

        if let Some(path) = local_path {
            self.cleanup.enqueue(CleanupJob::Remove {
                image_id: id.clone(),
                path,
            });
        } else {
            debug!(id = %id, "Deleted image had no local copy");
        }
        Ok(())
    }

    /// Empties the saved set and schedules removal of every local copy.
    ///
    /// # Errors
    /// Returns the clear-all use case error; nothing is scheduled in that case.
    pub async fn clear_all(&self) -> Result<(), ImageError> {
        self.store.dispatch(ImageAction::Pending(Operation::ClearAll));

        if let Err(e) = self.clear_all_use_case.execute().await {
            return Err(self.reject(Operation::ClearAll, e));
        }

        let paths: Vec<_> = self
            .store
            .saved_images()
            .into_iter()
            .filter_map(|image| image.local_path)
            .collect();
        self.store.dispatch(ImageAction::ClearAllFulfilled);

        if !paths.is_empty() {
            self.cleanup.enqueue(CleanupJob::RemoveMany { paths });
        }
        Ok(())
    }

    /// Loads the saved set from the repository, replacing the store contents.
    ///
    /// # Errors
    /// Returns the list use case error.
    pub async fn list(&self) -> Result<Vec<Image>, ImageError> {
        self.store.dispatch(ImageAction::Pending(Operation::List));

        match self.list_use_case.execute().await {
            Ok(images) => {
                info!(count = images.len(), "Restored saved images");
                self.store.dispatch(ImageAction::ListFulfilled(images.clone()));
                Ok(images)
            }
            Err(e) => Err(self.reject(Operation::List, e)),
        }
    }

    /// Returns the path or URL an image should be displayed from.
    pub async fn resolve_source(&self, image: &Image) -> String {
        self.cache.resolve_source(image).await
    }

    /// Removes the whole local images directory without touching the saved set.
    ///
    /// Saved entries keep their recorded paths and resolve to their remote URL afterwards.
    pub async fn purge_local_cache(&self) -> LocalDeletion {
        self.cache.clear_all_local().await
    }

    /// Fetches one page of the remote gallery.
    ///
    /// # Errors
    /// Returns `Remote` if the gallery request fails.
    pub async fn browse(&self, query: ImageQuery) -> Result<ImagePage, ImageError> {
        self.remote.fetch_page(query).await
    }

    /// Fetches one gallery image by id.
    ///
    /// # Errors
    /// Returns `Remote` if the gallery request fails.
    pub async fn fetch(&self, id: &ImageId) -> Result<Image, ImageError> {
        self.remote.fetch_image(id).await
    }

    fn reject(&self, op: Operation, error: ImageError) -> ImageError {
        warn!(operation = %op, error = %error, "Image operation failed");
        self.store.dispatch(ImageAction::Rejected {
            op,
            message: Some(error.to_string()),
        });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    use crate::application::services::{CleanupReport, CleanupWorker};
    use crate::application::store::OperationStatus;
    use crate::domain::ports::{FileSystemCapability, FileSystemPort};
    use crate::domain::ports::mocks::{InMemoryFileSystem, MockImageRepository, MockRemoteGallery};

    struct Harness {
        ops: ImageOperations,
        fs: Arc<InMemoryFileSystem>,
        repo: Arc<MockImageRepository>,
        reports: mpsc::UnboundedReceiver<CleanupReport>,
        worker: JoinHandle<()>,
    }

    impl Harness {
        fn new(fs: InMemoryFileSystem) -> Self {
            let fs = Arc::new(fs);
            let repo = Arc::new(MockImageRepository::new());
            let cache = Arc::new(LocalImageCache::new(FileSystemCapability::available(
                fs.clone(),
            )));
            let (report_tx, reports) = mpsc::unbounded_channel();
            let (worker, queue) = CleanupWorker::new(cache.clone());
            let worker = worker.with_reports(report_tx).spawn();
            let remote = Arc::new(MockRemoteGallery::new(vec![image("a1"), image("b2")]));

            let ops = ImageOperations::new(
                Arc::new(ImageStore::new()),
                repo.clone(),
                cache,
                remote,
                queue,
            );
            Self {
                ops,
                fs,
                repo,
                reports,
                worker,
            }
        }

        async fn shutdown(self) -> Vec<CleanupReport> {
            let Self {
                ops,
                mut reports,
                worker,
                ..
            } = self;
            drop(ops);
            worker.await.unwrap();
            let mut collected = Vec::new();
            while let Ok(report) = reports.try_recv() {
                collected.push(report);
            }
            collected
        }
    }

    fn image(id: &str) -> Image {
        Image::new(id, format!("https://x/{id}.png"), "Alice", 640, 480)
    }

    #[tokio::test]
    async fn test_invalid_image_leaves_set_unchanged() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();

        let result = harness.ops.save(Image::new("", "", "", 0, 0)).await;

        assert!(matches!(result, Err(ImageError::InvalidImage { .. })));
        let state = harness.ops.store().snapshot();
        assert_eq!(state.saved_images, harness.repo.stored().await);
        assert_eq!(state.saved_images.len(), 1);
        assert_eq!(state.status(Operation::Save), OperationStatus::Failed);
        assert!(state.error(Operation::Save).unwrap().contains("invalid image"));
    }

    #[tokio::test]
    async fn test_save_stores_local_copy() {
        let harness = Harness::new(InMemoryFileSystem::new());

        let saved = harness
            .ops
            .save(Image::new("a1", "https://x/a1.png", "Alice", 640, 480))
            .await
            .unwrap();

        assert!(saved.local_path().unwrap().ends_with("a1.png"));
        assert!(harness.fs.has_file(Path::new("/docs/images/a1.png")).await);
        assert_eq!(harness.repo.stored().await.len(), 1);
        assert!(harness.ops.is_saved(&ImageId::new("a1")));
        assert_eq!(
            harness.ops.store().snapshot().status(Operation::Save),
            OperationStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_delete_schedules_one_cleanup() {
        let mut harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();

        harness.ops.delete(&ImageId::new("a1")).await.unwrap();

        let report = harness.reports.recv().await.unwrap();
        assert_eq!(report.path, PathBuf::from("/docs/images/a1.png"));
        assert_eq!(report.outcome, LocalDeletion::Removed);
        assert!(!harness.ops.is_saved(&ImageId::new("a1")));
        assert!(harness.repo.stored().await.is_empty());
        assert_eq!(
            harness.fs.deletes().await,
            vec![PathBuf::from("/docs/images/a1.png")]
        );

        assert!(harness.shutdown().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_local_file_does_not_fail_delete() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();
        harness.ops.save(image("b2")).await.unwrap();
        harness
            .fs
            .delete(Path::new("/docs/images/a1.png"))
            .await
            .unwrap();

        tokio_test::assert_ok!(harness.ops.delete(&ImageId::new("a1")).await);
        tokio_test::assert_ok!(harness.ops.delete(&ImageId::new("b2")).await);

        assert!(harness.ops.store().saved_images().is_empty());
        let reports = harness.shutdown().await;
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.outcome.is_clean()));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_image_and_skips_cleanup() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();
        harness.repo.set_fail_deletes(true);

        let result = harness.ops.delete(&ImageId::new("a1")).await;

        assert!(matches!(result, Err(ImageError::Persistence { .. })));
        assert!(harness.ops.is_saved(&ImageId::new("a1")));
        assert_eq!(
            harness.ops.store().snapshot().status(Operation::Delete),
            OperationStatus::Failed
        );
        let fs = harness.fs.clone();
        assert!(harness.shutdown().await.is_empty());
        assert!(fs.deletes().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_removes_each_local_copy_once() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();
        harness.ops.save(image("b2")).await.unwrap();
        harness
            .ops
            .save(image("c3").with_local_path("/elsewhere/c3.png"))
            .await
            .unwrap();
        harness
            .ops
            .store()
            .dispatch(ImageAction::SaveFulfilled(image("d4")));

        harness.ops.clear_all().await.unwrap();

        assert!(harness.ops.store().saved_images().is_empty());
        assert!(harness.repo.stored().await.is_empty());
        let fs = harness.fs.clone();
        let reports = harness.shutdown().await;
        assert_eq!(reports.len(), 3);
        let mut deletes = fs.deletes().await;
        deletes.sort();
        assert_eq!(
            deletes,
            vec![
                PathBuf::from("/docs/images/a1.png"),
                PathBuf::from("/docs/images/b2.png"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_restores_saved_set() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.ops.save(image("a1")).await.unwrap();
        harness
            .ops
            .store()
            .dispatch(ImageAction::ClearAllFulfilled);

        let images = harness.ops.list().await.unwrap();

        assert_eq!(images.len(), 1);
        assert!(harness.ops.is_saved(&ImageId::new("a1")));
        assert_eq!(
            harness.ops.store().snapshot().status(Operation::List),
            OperationStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_list_failure_records_error() {
        let harness = Harness::new(InMemoryFileSystem::new());
        harness.repo.set_fail_reads(true);

        assert!(harness.ops.list().await.is_err());
        let state = harness.ops.store().snapshot();
        assert_eq!(state.status(Operation::List), OperationStatus::Failed);
        assert!(state.error(Operation::List).is_some());
    }

    #[tokio::test]
    async fn test_browse_and_fetch_use_remote() {
        let harness = Harness::new(InMemoryFileSystem::new());

        let page = harness.ops.browse(ImageQuery::new(1, 1)).await.unwrap();
        assert_eq!(page.images, vec![image("a1")]);
        assert_eq!(page.next_page, Some(2));

        let fetched = harness.ops.fetch(&ImageId::new("b2")).await.unwrap();
        assert_eq!(fetched, image("b2"));
        assert!(harness.ops.fetch(&ImageId::new("zz")).await.is_err());
    }

    #[tokio::test]
    async fn test_purge_local_cache_keeps_saved_set() {
        let harness = Harness::new(InMemoryFileSystem::new());
        let saved = harness.ops.save(image("a1")).await.unwrap();

        assert_eq!(harness.ops.purge_local_cache().await, LocalDeletion::Removed);

        assert!(harness.ops.is_saved(&ImageId::new("a1")));
        assert_eq!(harness.ops.resolve_source(&saved).await, "https://x/a1.png");
    }
}
