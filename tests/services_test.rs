use guidecam::geometry::GuideRect;
use guidecam::permissions::PermissionStatus;
use guidecam::services::{
    CameraService, CropService, FilesystemService, FolderLibrary, ImageCropper,
    MediaLibraryService, NativeFilesystem,
};
use guidecam::testing::SyntheticCamera;
use guidecam::{CaptureOptions, GuidecamError, OutputFormat};

#[tokio::test]
async fn native_filesystem_copy_delete_exists() {
    let dir = tempfile::tempdir().unwrap();
    let fs = NativeFilesystem::new(dir.path()).unwrap();

    let source = dir.path().join("a.bin");
    std::fs::write(&source, b"payload").unwrap();
    let source = source.to_string_lossy().into_owned();
    let dest = fs.temp_destination("b.bin");

    fs.copy(&source, &dest).await.unwrap();
    assert!(fs.exists(&dest).await.unwrap());

    fs.delete(&dest, true).await.unwrap();
    assert!(!fs.exists(&dest).await.unwrap());

    // Idempotent delete of an absent file is not an error.
    fs.delete(&dest, true).await.unwrap();

    // Non-idempotent delete of an absent file is.
    let err = fs.delete(&dest, false).await.unwrap_err();
    assert!(matches!(err, GuidecamError::Io(_)));
}

#[tokio::test]
async fn native_filesystem_private_path_policy() {
    let dir = tempfile::tempdir().unwrap();
    let fs = NativeFilesystem::new(dir.path()).unwrap();

    let inside = fs.temp_destination("photo.jpg");
    assert!(fs.is_private_path(&inside));
    assert!(!fs.is_private_path("/somewhere/else/photo.jpg"));
    assert!(!fs.is_private_path("asset://platform-handle"));
}

#[tokio::test]
async fn image_cropper_produces_rect_sized_output() {
    let dir = tempfile::tempdir().unwrap();

    let source = dir.path().join("source.png");
    let img = image::RgbImage::from_fn(100, 80, |x, y| image::Rgb([x as u8, y as u8, 0]));
    img.save(&source).unwrap();

    let cropper = ImageCropper::new(dir.path(), 90);
    let rect = GuideRect {
        origin_x: 10,
        origin_y: 20,
        width: 50,
        height: 40,
    };
    let output = cropper
        .crop(&source.to_string_lossy(), rect, OutputFormat::Jpeg)
        .await
        .unwrap();

    assert!(output.ends_with(".jpg"));
    let cropped = image::open(&output).unwrap();
    assert_eq!(cropped.width(), 50);
    assert_eq!(cropped.height(), 40);
}

#[tokio::test]
async fn image_cropper_rejects_out_of_bounds_rect() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.png");
    image::RgbImage::new(40, 40).save(&source).unwrap();

    let cropper = ImageCropper::new(dir.path(), 90);
    let rect = GuideRect {
        origin_x: 30,
        origin_y: 0,
        width: 20,
        height: 20,
    };
    let err = cropper
        .crop(&source.to_string_lossy(), rect, OutputFormat::Jpeg)
        .await
        .unwrap_err();
    assert!(matches!(err, GuidecamError::Geometry(_)));
}

#[tokio::test]
async fn folder_library_saves_and_reports_permission() {
    let source_dir = tempfile::tempdir().unwrap();
    let library_dir = tempfile::tempdir().unwrap();
    let output_dir = library_dir.path().join("photos");

    let library = FolderLibrary::new(&output_dir, false);

    // Directory does not exist yet: permission undetermined until requested.
    assert_eq!(
        library.permission_status().await.unwrap(),
        PermissionStatus::NotDetermined
    );
    assert_eq!(
        library.request_permission().await.unwrap(),
        PermissionStatus::Granted
    );

    let source = source_dir.path().join("photo.jpg");
    std::fs::write(&source, b"jpeg-bytes").unwrap();

    let asset_id = library
        .add_to_library(&source.to_string_lossy())
        .await
        .unwrap();
    let saved = output_dir.join(format!("{}.jpg", asset_id));
    assert!(saved.exists());
}

#[tokio::test]
async fn folder_library_organizes_by_date() {
    let source_dir = tempfile::tempdir().unwrap();
    let library_dir = tempfile::tempdir().unwrap();

    let library = FolderLibrary::new(library_dir.path(), true);
    let source = source_dir.path().join("photo.jpg");
    std::fs::write(&source, b"jpeg-bytes").unwrap();

    let asset_id = library
        .add_to_library(&source.to_string_lossy())
        .await
        .unwrap();

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert!(library_dir.path().join(date).join(format!("{}.jpg", asset_id)).exists());
}

#[tokio::test]
async fn synthetic_camera_writes_decodable_frames() {
    let dir = tempfile::tempdir().unwrap();
    let camera = SyntheticCamera::with_resolution(dir.path(), 320, 240);

    let frame = camera.capture(&CaptureOptions::default()).await.unwrap();
    assert_eq!(frame.width, 320);
    assert_eq!(frame.height, 240);

    let decoded = image::open(&frame.uri).unwrap();
    assert_eq!(decoded.width(), 320);
    assert_eq!(decoded.height(), 240);
}
