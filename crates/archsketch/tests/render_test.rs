//! Integration tests for the DiagramRenderer file output

use std::fs::{self, File};

use archsketch::{
    ArchsketchError, DiagramRenderer,
    config::{AppConfig, ExportConfig, StyleConfig},
};

fn read_png_info(path: &std::path::Path) -> (u32, u32, Option<png::PixelDimensions>) {
    let decoder = png::Decoder::new(File::open(path).expect("Failed to open PNG"));
    let reader = decoder.read_info().expect("Failed to read PNG header");
    let info = reader.info();
    (info.width, info.height, info.pixel_dims)
}

#[test]
fn test_render_writes_single_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vercel_architecture_diagram.png");

    let renderer = DiagramRenderer::default();
    renderer.render(&path).expect("Failed to render diagram");

    let metadata = fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0, "PNG should not be empty");

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "Exactly one file should be written");
}

#[test]
fn test_png_dimensions_match_raster_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");

    let renderer = DiagramRenderer::default();
    renderer.render(&path).unwrap();

    let (width, height, dims) = read_png_info(&path);
    assert_eq!((width, height), renderer.raster_size().unwrap());

    // 14 x 10 inch figure at 300 DPI, cropped to content plus 0.1 inch
    assert!((3000..=4300).contains(&width), "unexpected width {width}");
    assert!((2500..=3200).contains(&height), "unexpected height {height}");
    assert!(width > height);

    let dims = dims.expect("PNG should carry physical dimensions");
    assert_eq!(dims.unit, png::Unit::Meter);
    assert_eq!(dims.xppu, 11811);
    assert_eq!(dims.yppu, 11811);
}

#[test]
fn test_render_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");

    let renderer = DiagramRenderer::default();
    renderer.render(&first).unwrap();
    renderer.render(&second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_render_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");
    fs::write(&path, b"stale").unwrap();

    DiagramRenderer::default().render(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ivdgroup_mvp").join("diagram.png");

    let result = DiagramRenderer::default().render(&path);

    assert!(
        matches!(result, Err(ArchsketchError::Io(_))),
        "Expected I/O error, got {result:?}"
    );
    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists(), "Directories must not be created");
}

#[test]
fn test_svg_extension_writes_vector_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.svg");

    DiagramRenderer::default().render(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_dpi_from_config() {
    let config = AppConfig::new(ExportConfig::new(150.0, 0.1), StyleConfig::default());
    let low = DiagramRenderer::new(config).raster_size().unwrap();
    let high = DiagramRenderer::default().raster_size().unwrap();

    assert!(high.0 > low.0 * 2 - 2 && high.0 <= low.0 * 2);
    assert!(high.1 > low.1 * 2 - 2 && high.1 <= low.1 * 2);
}

#[test]
fn test_oversized_raster_is_export_error() {
    let config = AppConfig::new(ExportConfig::new(1.0e7, 0.1), StyleConfig::default());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");

    let result = DiagramRenderer::new(config).render(&path);

    assert!(
        matches!(result, Err(ArchsketchError::Export(_))),
        "Expected export error, got {result:?}"
    );
    assert!(!path.exists(), "Nothing should be written");
}

#[test]
fn test_invalid_background_is_config_error() {
    let config = AppConfig::new(
        ExportConfig::default(),
        StyleConfig::new(Some("definitely-not-a-color".to_string()), None),
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.png");

    let result = DiagramRenderer::new(config).render(&path);
    assert!(matches!(result, Err(ArchsketchError::Config(_))));
    assert!(!path.exists());
}
