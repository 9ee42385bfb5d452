use kurbo::{PathEl, Point, Rect, Shape};

use super::*;

fn square(side: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((side, 0.0));
    p.line_to((side, side));
    p.line_to((0.0, side));
    p.close_path();
    p
}

fn first_point(o: &Outline) -> Point {
    match o.path().elements()[0] {
        PathEl::MoveTo(p) => p,
        other => panic!("expected MoveTo, got {other:?}"),
    }
}

fn assert_rect_near(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!(
        (a.x0 - b.x0).abs() < eps
            && (a.y0 - b.y0).abs() < eps
            && (a.x1 - b.x1).abs() < eps
            && (a.y1 - b.y1).abs() < eps,
        "{a:?} != {b:?}"
    );
}

#[test]
fn constructors_tag_mode_and_weight() {
    let f = Outline::fill(square(1.0));
    assert_eq!(f.mode(), OutlineMode::Fill);
    let s = Outline::stroke(square(1.0), 6.0);
    assert_eq!(s.mode(), OutlineMode::Stroke);
    assert_eq!(s.weight(), 6.0);
    assert_eq!(
        Outline::with_mode(square(1.0), OutlineMode::Stroke, 2.0).weight(),
        2.0
    );
}

#[test]
fn scale_then_translate_applies_in_call_order() {
    let o = Outline::fill(square(10.0)).scale(2.0, 2.0).translate(10.0, 0.0);
    assert_rect_near(o.path().bounding_box(), Rect::new(10.0, 0.0, 30.0, 20.0));

    let unit = Outline::fill(square(1.0)).scale(2.0, 2.0).translate(10.0, 0.0);
    assert_rect_near(unit.path().bounding_box(), Rect::new(10.0, 0.0, 12.0, 2.0));
}

#[test]
fn translate_then_scale_scales_the_offset_too() {
    let o = Outline::fill(square(10.0)).translate(10.0, 0.0).scale(2.0, 2.0);
    assert_rect_near(o.path().bounding_box(), Rect::new(20.0, 0.0, 40.0, 20.0));
}

#[test]
fn transforms_leave_receiver_untouched() {
    let base = Outline::stroke(square(4.0), 2.0);
    let before = base.clone();
    let _moved = base.translate(5.0, 5.0).rotate(1.0).scale_uniform(3.0);
    assert_eq!(base, before);
}

#[test]
fn positive_rotation_turns_x_toward_y() {
    let mut p = BezPath::new();
    p.move_to((1.0, 0.0));
    let o = Outline::fill(p).rotate(std::f64::consts::FRAC_PI_2);
    let pt = first_point(&o);
    assert!(pt.x.abs() < 1e-12);
    assert!((pt.y - 1.0).abs() < 1e-12);
}

#[test]
fn scale_then_rotate_differs_from_rotate_then_scale() {
    let mut p = BezPath::new();
    p.move_to((1.0, 0.0));
    let o = Outline::fill(p);
    let a = first_point(&o.scale(2.0, 1.0).rotate(std::f64::consts::FRAC_PI_2));
    let b = first_point(&o.rotate(std::f64::consts::FRAC_PI_2).scale(2.0, 1.0));
    assert!((a.y - 2.0).abs() < 1e-12);
    assert!((b.y - 1.0).abs() < 1e-12);
}

#[test]
fn batched_subpaths_share_one_transform() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 0.0));
    p.move_to((0.0, 2.0));
    p.line_to((1.0, 2.0));
    let o = Outline::stroke(p, 1.0).translate(5.0, 5.0);
    let moves: Vec<Point> = o
        .path()
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(moves, vec![Point::new(5.0, 5.0), Point::new(5.0, 7.0)]);
}

#[test]
fn stroke_weight_survives_transforms() {
    let o = Outline::stroke(square(1.0), 6.0).scale(3.0, 3.0);
    assert_eq!(o.weight(), 6.0);
    assert_eq!(o.mode(), OutlineMode::Stroke);
}
