use kurbo::{Rect, Shape};

use super::*;
use crate::surface::recording::{RecordingSurface, SurfaceOp};

fn dot(x: f64) -> impl Part {
    move |_: f64, path: &mut BezPath, _: &FaceState| {
        path.move_to((x, 0.0));
        path.line_to((x + 1.0, 0.0));
        path.line_to((x + 1.0, 1.0));
        path.close_path();
    }
}

fn single_outline(surface: &RecordingSurface) -> (Color, Outline) {
    let ops: Vec<_> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            SurfaceOp::BlendOutline { color, outline, .. } => Some((*color, outline.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(ops.len(), 1);
    ops.into_iter().next().unwrap()
}

#[test]
fn parts_merge_into_one_outline() {
    let mut layer = Layer::fill(ThemeColor::Primary)
        .with_part("a", dot(0.0))
        .with_part("b", dot(10.0));
    let mut surface = RecordingSurface::new(100, 100);
    let mut face = FaceState::default();
    face.breath = 0.0;
    layer.render(16.0, &mut surface, &face).unwrap();

    let (color, outline) = single_outline(&surface);
    assert_eq!(color, Color::WHITE);
    assert_eq!(outline.mode(), OutlineMode::Fill);
    let bbox = outline.path().bounding_box();
    assert_eq!(bbox, Rect::new(0.0, 0.0, 11.0, 1.0));
}

#[test]
fn same_key_replaces_in_place() {
    let mut layer = Layer::fill(ThemeColor::Primary)
        .with_part("left", dot(0.0))
        .with_part("right", dot(10.0));
    layer.add_part("left", dot(50.0));
    assert_eq!(layer.part_keys().collect::<Vec<_>>(), vec!["left", "right"]);

    let mut surface = RecordingSurface::new(100, 100);
    let mut face = FaceState::default();
    face.breath = 0.0;
    layer.render(16.0, &mut surface, &face).unwrap();
    let (_, outline) = single_outline(&surface);
    let bbox = outline.path().bounding_box();
    assert_eq!(bbox, Rect::new(10.0, 0.0, 51.0, 1.0));
}

#[test]
fn remove_part_reports_presence() {
    let mut layer = Layer::fill(ThemeColor::Primary).with_part("a", dot(0.0));
    assert!(layer.remove_part("a"));
    assert!(!layer.remove_part("a"));
    assert_eq!(layer.part_keys().count(), 0);
}

#[test]
fn breath_bobs_the_whole_layer() {
    let mut layer = Layer::fill(ThemeColor::Primary).with_part("a", dot(0.0));
    let mut surface = RecordingSurface::new(100, 100);
    let mut face = FaceState::default();
    face.breath = -0.5;
    layer.render(16.0, &mut surface, &face).unwrap();
    let (_, outline) = single_outline(&surface);
    let bbox = outline.path().bounding_box();
    assert_eq!(bbox, Rect::new(0.0, -1.5, 1.0, -0.5));
}

#[test]
fn stroke_layer_uses_secondary_color_and_fixed_weight() {
    let mut layer = Layer::stroke(ThemeColor::Secondary, 4.0).with_part("a", dot(0.0));
    let mut surface = RecordingSurface::new(100, 100);
    let mut face = FaceState::default();
    face.theme.secondary = [1, 2, 3];
    layer.render(16.0, &mut surface, &face).unwrap();
    let (color, outline) = single_outline(&surface);
    assert_eq!(color, Color::rgb(1, 2, 3));
    assert_eq!(outline.mode(), OutlineMode::Stroke);
    assert_eq!(outline.weight(), 4.0);
}

#[test]
fn parts_see_the_face_state() {
    let mut layer = Layer::fill(ThemeColor::Primary).with_part(
        "mouth",
        |_: f64, path: &mut BezPath, face: &FaceState| {
            let h = 10.0 * face.mouth.open;
            path.move_to((0.0, 0.0));
            path.line_to((0.0, h));
        },
    );
    let mut surface = RecordingSurface::new(100, 100);
    let mut face = FaceState::default();
    face.breath = 0.0;
    face.mouth.open = 0.4;
    layer.render(16.0, &mut surface, &face).unwrap();
    let (_, outline) = single_outline(&surface);
    assert_eq!(outline.path().bounding_box().height(), 4.0);
}
