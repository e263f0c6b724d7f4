mod common;

use std::path::{Path, PathBuf};

use common::*;
use egui::vec2;
use quadmark::shape::{DEFAULT_FILL_COLOR, DEFAULT_LINE_COLOR};
use quadmark::{AnnotationFile, Canvas, PersistenceError, ShapeRecord};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("quadmark-test-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn test_save_and_reload_annotations() {
    let (mut canvas, _events) = canvas_with_image(320.0, 240.0);
    load_rects(&mut canvas, &[((10.0, 10.0), (50.0, 50.0)), ((100.0, 20.0), (180.0, 90.0))]);
    canvas.set_verified(true);

    let path = temp_path("image.json");
    let file = AnnotationFile::from_canvas(&canvas, Some(PathBuf::from("image.png")));
    file.save(&path).unwrap();

    let loaded = AnnotationFile::load(&path).unwrap();
    assert_eq!(loaded, file);
    assert_eq!(loaded.image_size, vec2(320.0, 240.0));

    let mut restored = Canvas::new();
    restored.load_image(vec2(320.0, 240.0));
    loaded.apply_to(&mut restored).unwrap();

    assert!(restored.verified());
    assert_eq!(restored.shapes().len(), 2);
    for (restored, original) in restored.shapes().iter().zip(canvas.shapes()) {
        assert_eq!(restored.points(), original.points());
        assert_eq!(restored.label, original.label);
        assert!(restored.is_closed());
        assert_ne!(restored.id(), original.id());
    }
}

#[test]
fn test_missing_colors_fall_back_to_defaults() {
    let path = temp_path("plain.json");
    let file = AnnotationFile {
        version: "0.0.0".to_owned(),
        image_path: None,
        image_size: vec2(100.0, 100.0),
        verified: false,
        shapes: vec![ShapeRecord {
            label: "cat".to_owned(),
            points: rect_points((1.0, 2.0), (3.0, 4.0)),
            line_color: None,
            fill_color: None,
            difficult: true,
        }],
    };
    file.save(&path).unwrap();

    let shapes = AnnotationFile::load(&path).unwrap().to_shapes();
    assert_eq!(shapes[0].line_color, DEFAULT_LINE_COLOR);
    assert_eq!(shapes[0].fill_color, DEFAULT_FILL_COLOR);
    assert!(shapes[0].difficult);
}

#[test]
fn test_shape_with_wrong_point_count_is_rejected() {
    let path = temp_path("broken.json");
    let mut points = rect_points((1.0, 2.0), (3.0, 4.0));
    points.pop();
    let file = AnnotationFile {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        image_path: None,
        image_size: vec2(100.0, 100.0),
        verified: false,
        shapes: vec![ShapeRecord {
            label: "cat".to_owned(),
            points,
            line_color: None,
            fill_color: None,
            difficult: false,
        }],
    };
    file.save(&path).unwrap();

    assert!(matches!(AnnotationFile::load(&path), Err(PersistenceError::InvalidData(_))));
}

#[test]
fn test_short_shapes_are_never_applied_to_a_canvas() {
    let (mut canvas, _events) = canvas_with_image(100.0, 100.0);
    let ids = load_rects(&mut canvas, &[((10.0, 10.0), (50.0, 50.0))]);
    let file = AnnotationFile {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        image_path: None,
        image_size: vec2(100.0, 100.0),
        verified: true,
        shapes: vec![ShapeRecord {
            label: "tri".to_owned(),
            points: rect_points((1.0, 2.0), (3.0, 4.0))[..3].to_vec(),
            line_color: None,
            fill_color: None,
            difficult: false,
        }],
    };

    assert!(matches!(file.apply_to(&mut canvas), Err(PersistenceError::InvalidData(_))));
    assert_eq!(canvas.shapes().len(), 1);
    assert_eq!(canvas.shapes()[0].id(), ids[0]);
    assert!(!canvas.verified());
    assert!(!file.to_shapes()[0].is_closed());
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let path = temp_path("garbage.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(AnnotationFile::load(&path), Err(PersistenceError::Serialization(_))));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = temp_path("absent.json");
    assert!(matches!(AnnotationFile::load(&path), Err(PersistenceError::Io(_))));
}

#[test]
fn test_annotation_path_sits_next_to_image() {
    assert_eq!(
        AnnotationFile::path_for_image(Path::new("/data/cats/001.jpg")),
        PathBuf::from("/data/cats/001.json")
    );
}
