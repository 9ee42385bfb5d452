use super::*;
use crate::foundation::core::region;

fn red() -> Color {
    Color::rgb(255, 0, 0)
}

fn blue() -> Color {
    Color::rgb(0, 0, 255)
}

#[test]
fn new_surface_is_transparent() {
    let s = PixmapSurface::new(8, 8).unwrap();
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(8, 0), None);
}

#[test]
fn zero_or_oversized_surfaces_are_rejected() {
    assert!(PixmapSurface::new(0, 10).is_err());
    assert!(PixmapSurface::new(70_000, 10).is_err());
}

#[test]
fn fill_region_paints_after_present() {
    let mut s = PixmapSurface::new(16, 16).unwrap();
    s.fill_region(red(), region(0.0, 0.0, 16.0, 16.0)).unwrap();
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 0]));
    s.present().unwrap();
    assert_eq!(s.pixel(5, 5), Some([255, 0, 0, 255]));
}

#[test]
fn untouched_pixels_survive_later_frames() {
    let mut s = PixmapSurface::new(16, 16).unwrap();
    s.fill_region(red(), region(0.0, 0.0, 16.0, 16.0)).unwrap();
    s.present().unwrap();

    s.fill_region(blue(), region(0.0, 0.0, 4.0, 4.0)).unwrap();
    s.present().unwrap();
    assert_eq!(s.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(10, 10), Some([255, 0, 0, 255]));
}

#[test]
fn regions_clip_drawing() {
    let mut s = PixmapSurface::new(16, 16).unwrap();
    s.begin_region(region(0.0, 0.0, 8.0, 16.0)).unwrap();
    s.fill_region(red(), region(0.0, 0.0, 16.0, 16.0)).unwrap();
    s.end_region().unwrap();
    s.present().unwrap();
    assert_eq!(s.pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(12, 2), Some([0, 0, 0, 0]));
}

#[test]
fn present_requires_balanced_regions() {
    let mut s = PixmapSurface::new(4, 4).unwrap();
    s.begin_region(region(0.0, 0.0, 4.0, 4.0)).unwrap();
    assert!(s.present().is_err());
    s.end_region().unwrap();
    assert!(s.present().is_ok());
    assert!(s.end_region().is_err());
}

#[test]
fn filled_outline_is_offset_by_origin() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((4.0, 0.0));
    path.line_to((4.0, 4.0));
    path.line_to((0.0, 4.0));
    path.close_path();
    let mut s = PixmapSurface::new(16, 16).unwrap();
    let square = Outline::fill(path);
    s.blend_outline(Color::WHITE, 255, &square, Point::new(8.0, 8.0))
        .unwrap();
    s.present().unwrap();
    assert_eq!(s.pixel(10, 10), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn rgba_export_has_one_entry_per_pixel() {
    let mut s = PixmapSurface::new(5, 3).unwrap();
    s.fill_region(blue(), region(0.0, 0.0, 5.0, 3.0)).unwrap();
    s.present().unwrap();
    let bytes = s.to_rgba8();
    assert_eq!(bytes.len(), 5 * 3 * 4);
    assert_eq!(&bytes[..4], &[0, 0, 255, 255]);
}
