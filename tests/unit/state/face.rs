use super::*;

#[test]
fn default_state_matches_documented_baseline() {
    let f = FaceState::default();
    assert_eq!(f.mouth.open, 0.0);
    assert_eq!(f.eyes.left.open, 1.0);
    assert_eq!(f.eyes.right.gaze_x, 0.0);
    assert_eq!(f.breath, 1.0);
    assert_eq!(f.emotion, Emotion::Neutral);
    assert_eq!(f.theme.primary, [255, 255, 255]);
    assert_eq!(f.theme.secondary, [0, 0, 0]);
}

#[test]
fn equal_fields_compare_equal_and_skip_render() {
    let a = FaceState::default();
    let mut b = FaceState::default();
    b.copy_from(&a);
    assert!(a.same_as(&b));
    assert!(a.same_as(&a));
    assert_eq!(a.diff(&b), FaceDiff::default());
}

#[test]
fn copy_is_deep() {
    let mut src = FaceState::default();
    let mut dst = FaceState::default();
    dst.copy_from(&src);
    src.eyes.left.gaze_x = 4.0;
    src.theme.primary[0] = 7;
    assert_eq!(dst.eyes.left.gaze_x, 0.0);
    assert_eq!(dst.theme.primary[0], 255);
}

#[test]
fn field_change_requests_render_but_not_clear() {
    let last = FaceState::default();
    let mut cur = last;
    cur.eyes.right.open = 0.5;
    let d = cur.diff(&last);
    assert!(d.should_render);
    assert!(!d.should_clear);
}

#[test]
fn theme_change_requests_clear_and_render() {
    let last = FaceState::default();
    let mut cur = last;
    cur.theme.secondary = [0, 0, 64];
    let d = cur.diff(&last);
    assert!(d.should_clear);
    assert!(d.should_render);
}

#[test]
fn nan_gaze_is_never_equal() {
    let mut a = FaceState::default();
    a.eyes.left.gaze_y = f64::NAN;
    let b = a;
    assert!(!a.same_as(&b));
    assert!(a.diff(&b).should_render);
}

#[test]
fn emotion_parses_case_insensitively() {
    assert_eq!("angry".parse::<Emotion>().unwrap(), Emotion::Angry);
    assert_eq!("HOT".parse::<Emotion>().unwrap(), Emotion::Hot);
    assert!("grumpy".parse::<Emotion>().is_err());
}

#[test]
fn emotion_serializes_upper_case() {
    let json = serde_json::to_string(&Emotion::Doubtful).unwrap();
    assert_eq!(json, "\"DOUBTFUL\"");
}

#[test]
fn theme_lookup_by_name() {
    let t = Theme::default();
    assert_eq!(t.get(ThemeColor::Primary), [255, 255, 255]);
    assert_eq!(t.get(ThemeColor::Secondary), [0, 0, 0]);
}
