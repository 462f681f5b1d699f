// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios exercising the controller against real files.

use photo_lens::config::Config;
use photo_lens::media::{filters_for, CodecRegistry, DialogIntent, DialogSession};
use photo_lens::viewer::{CommandId, PageExtent, ViewerController};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_sample_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([10, 20, 30, 255]))
        .save(&path)
        .expect("failed to write sample png");
    path
}

#[test]
fn open_zoom_and_convert_to_jpeg() {
    let dir = tempdir().expect("temp dir");
    let source = write_sample_png(dir.path(), "shot.png", 640, 480);
    let target = dir.path().join("shot.jpg");

    let mut controller = ViewerController::new(&Config::default());
    controller.open_file(&source).expect("open");
    assert_eq!(
        controller.status(),
        format!("Opened \"{}\", 640x480, Depth: 32", source.display())
    );

    controller.set_page_extent(PageExtent {
        width: 320,
        height: 240,
    });
    controller.set_scroll(100, 50);
    controller.dispatch(CommandId::ZoomIn);
    // x: round(1.25 * 100 + 0.25 * 320 / 2) = 165
    // y: round(1.25 * 50 + 0.25 * 240 / 2) = round(92.5) = 93
    assert_eq!(controller.viewport().scroll(), (165, 93));

    controller.save_file(&target).expect("save");
    assert_eq!(
        controller.status(),
        format!("Saved \"{}\"", target.display())
    );

    // The converted file decodes back with the same dimensions.
    let mut verifier = ViewerController::new(&Config::default());
    verifier.open_file(&target).expect("reload");
    let reloaded = verifier.image().expect("image");
    assert_eq!((reloaded.width(), reloaded.height()), (640, 480));
}

#[test]
fn failed_open_keeps_viewer_usable() {
    let dir = tempdir().expect("temp dir");
    let source = write_sample_png(dir.path(), "shot.png", 32, 32);

    let mut controller = ViewerController::new(&Config::default());
    controller.open_file(&source).expect("open");
    controller.dispatch(CommandId::ZoomIn);
    let zoom = controller.viewport().zoom_factor();

    assert!(controller.open_file(dir.path().join("gone.png")).is_err());
    assert!(controller.status().starts_with("Cannot load"));

    // The previous image is still displayed and still zoomable.
    assert!(controller.image().is_some());
    assert_eq!(controller.viewport().zoom_factor(), zoom);
    assert!(controller.dispatch(CommandId::ZoomOut));
}

#[test]
fn save_dialog_negotiation_matches_shell_expectations() {
    let set = filters_for(DialogIntent::Save, &CodecRegistry::default()).expect("filters");

    // Deterministic ordering, JPEG preselected, "jpg" suffix for new files.
    let mimes: Vec<&str> = set.filters().iter().map(|f| f.mime.as_str()).collect();
    let mut sorted = mimes.clone();
    sorted.sort_unstable();
    assert_eq!(mimes, sorted);
    assert_eq!(set.default_filter().mime, "image/jpeg");
    assert_eq!(set.default_suffix(), "jpg");

    // The session remembers where the user saved to.
    let mut session = DialogSession::new();
    session.remember(Path::new("/photos/exports/shot.jpg"));
    assert_eq!(session.starting_directory(), Path::new("/photos/exports"));
}
