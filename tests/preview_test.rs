use guidecam::preview::{PreviewController, PreviewState};
use guidecam::testing::{MemoryFilesystem, MemoryLibrary};
use guidecam::{CaptureCategory, CapturedImage, GuideOrientation, GuidecamError};
use guidecam::permissions::PermissionStatus;
use std::sync::Arc;

fn photo(final_uri: &str) -> CapturedImage {
    CapturedImage {
        source_uri: "asset://raw-frame".to_string(),
        width: 1000,
        height: 2000,
        orientation: GuideOrientation::Vertical,
        category: CaptureCategory::Label,
        final_uri: final_uri.to_string(),
    }
}

fn preview_with(
    final_uri: &str,
    fs: Arc<MemoryFilesystem>,
    library: Arc<MemoryLibrary>,
) -> PreviewController {
    PreviewController::new(photo(final_uri), fs, library)
}

#[tokio::test]
async fn external_handle_is_copied_into_private_storage() {
    let fs = Arc::new(MemoryFilesystem::new());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), Arc::new(MemoryLibrary::new()));

    assert_eq!(preview.state(), PreviewState::Materializing);
    assert_eq!(preview.materialize().await.unwrap(), PreviewState::Ready);

    let info = preview.info();
    assert!(!info.degraded);
    assert!(info.working_uri.starts_with("memfs:/private/"));
    assert!(fs.contains(&info.working_uri));

    preview.dismiss().await;
}

#[tokio::test]
async fn save_releases_temp_file_and_finishes() {
    let fs = Arc::new(MemoryFilesystem::new());
    let library = Arc::new(MemoryLibrary::new());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), library.clone());
    preview.materialize().await.unwrap();
    let working = preview.working_uri().to_string();

    let asset_id = preview.save().await.unwrap();
    assert!(!asset_id.is_empty());
    assert_eq!(preview.state(), PreviewState::Done);

    // The library received the working copy, then the copy was released.
    assert_eq!(library.saved_count(), 1);
    assert_eq!(library.saved.lock().unwrap()[0], working);
    assert!(!fs.contains(&working));
    assert_eq!(fs.delete_count(), 1);
}

#[tokio::test]
async fn permission_denied_keeps_preview_and_file_for_retry() {
    let fs = Arc::new(MemoryFilesystem::new());
    let library = Arc::new(MemoryLibrary::denying());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), library.clone());
    preview.materialize().await.unwrap();
    let working = preview.working_uri().to_string();

    let err = preview.save().await.unwrap_err();
    assert!(matches!(err, GuidecamError::Permission(_)));
    assert_eq!(preview.state(), PreviewState::Ready);
    assert!(fs.contains(&working));
    assert_eq!(fs.delete_count(), 0);
    assert_eq!(library.saved_count(), 0);

    // User grants access in the re-prompt; the retry succeeds.
    library.set_permission(PermissionStatus::Granted);
    preview.save().await.unwrap();
    assert_eq!(preview.state(), PreviewState::Done);
    assert!(!fs.contains(&working));
}

#[tokio::test]
async fn library_failure_never_deletes_the_working_copy() {
    let fs = Arc::new(MemoryFilesystem::new());
    let library = Arc::new(MemoryLibrary::with_add_failure());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), library);
    preview.materialize().await.unwrap();
    let working = preview.working_uri().to_string();

    let err = preview.save().await.unwrap_err();
    assert!(matches!(err, GuidecamError::Persistence(_)));
    assert_eq!(preview.state(), PreviewState::Ready);
    // Never: file deleted but save not succeeded.
    assert!(fs.contains(&working));

    preview.retake().await;
    assert!(!fs.contains(&working));
}

#[tokio::test]
async fn retake_cleans_up_exactly_once() {
    let fs = Arc::new(MemoryFilesystem::new());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), Arc::new(MemoryLibrary::new()));
    preview.materialize().await.unwrap();

    preview.retake().await;
    assert_eq!(preview.state(), PreviewState::Done);
    assert_eq!(fs.delete_count(), 1);

    // Implicit teardown after an explicit retake must not double-delete.
    preview.dismiss().await;
    assert_eq!(fs.delete_count(), 1);
}

#[tokio::test]
async fn retake_before_materialize_settles_still_reaches_done() {
    let fs = Arc::new(MemoryFilesystem::new());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), Arc::new(MemoryLibrary::new()));

    preview.retake().await;
    assert_eq!(preview.state(), PreviewState::Done);

    // The pending materialization settles afterwards; the session stays
    // finished and no working copy is created.
    assert_eq!(preview.materialize().await.unwrap(), PreviewState::Done);
    assert_eq!(fs.delete_count(), 0);
    assert!(!fs.contains(&preview.info().working_uri));
}

#[tokio::test]
async fn save_is_rejected_while_materializing() {
    let mut preview = preview_with(
        "asset://crop-1.jpg",
        Arc::new(MemoryFilesystem::new()),
        Arc::new(MemoryLibrary::new()),
    );

    let err = preview.save().await.unwrap_err();
    assert!(matches!(err, GuidecamError::InvalidState(_)));
    assert_eq!(preview.state(), PreviewState::Materializing);
    preview.retake().await;
}

#[tokio::test]
async fn degraded_preview_saves_the_original_handle() {
    let fs = Arc::new(MemoryFilesystem::with_copy_failure());
    let library = Arc::new(MemoryLibrary::new());
    let mut preview = preview_with("asset://crop-1.jpg", fs.clone(), library.clone());
    preview.materialize().await.unwrap();

    assert!(preview.info().degraded);
    preview.save().await.unwrap();

    assert_eq!(library.saved.lock().unwrap()[0], "asset://crop-1.jpg");
    // Nothing to clean up: no working copy was ever created.
    assert_eq!(fs.delete_count(), 0);
}
