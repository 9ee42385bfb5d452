use rand::SeedableRng;

use super::*;
use crate::foundation::error::FaceError;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn fixed_blink() -> Blink {
    Blink::new(
        BlinkConfig {
            open_min: 500.0,
            open_max: 500.0,
            close_min: 100.0,
            close_max: 100.0,
        },
        rng(0),
    )
    .unwrap()
}

fn apply(m: &mut impl Modifier, elapsed: f64) -> FaceState {
    let mut face = FaceState::default();
    m.apply(elapsed, &mut face).unwrap();
    face
}

#[test]
fn blink_toggles_after_exact_open_dwell() {
    let mut blink = fixed_blink();
    let face = apply(&mut blink, 499.0);
    assert!(!blink.is_closing());
    assert_eq!(face.eyes.left.open, 1.0);

    apply(&mut blink, 1.0);
    assert!(blink.is_closing());
}

#[test]
fn blink_follows_ease_curve_while_closing() {
    let mut blink = fixed_blink();
    apply(&mut blink, 500.0);
    assert!(blink.is_closing());

    // Factor is sampled before the elapsed time is added.
    let face = apply(&mut blink, 50.0);
    assert_eq!(face.eyes.left.open, 1.0);

    let face = apply(&mut blink, 0.0);
    let expected = 0.2 + (0.25f64.powi(2) * 16.0 / 9.0) * 0.8;
    assert!((face.eyes.left.open - expected).abs() < 1e-12);
    assert!((face.eyes.right.open - expected).abs() < 1e-12);


    let mut quarter = fixed_blink();
    apply(&mut quarter, 500.0);
    apply(&mut quarter, 25.0);
    let face = apply(&mut quarter, 0.0);
    assert!((face.eyes.left.open - Blink::MIN_OPEN).abs() < 1e-12);
}

#[test]
fn blink_reopens_after_close_dwell() {
    let mut blink = fixed_blink();
    apply(&mut blink, 500.0);
    apply(&mut blink, 100.0);
    assert!(!blink.is_closing());
    assert_eq!(blink.open_factor(), 1.0);
}

#[test]
fn blink_scales_existing_openness() {
    let mut blink = fixed_blink();
    apply(&mut blink, 500.0);
    apply(&mut blink, 50.0);
    let mut face = FaceState::default();
    face.eyes.left.open = 0.5;
    blink.apply(0.0, &mut face).unwrap();
    assert!(face.eyes.left.open < 0.5);
}

#[test]
fn blink_rejects_inverted_range() {
    let err = Blink::new(
        BlinkConfig {
            open_min: 10.0,
            open_max: 5.0,
            ..BlinkConfig::default()
        },
        rng(0),
    )
    .unwrap_err();
    assert!(matches!(err, FaceError::Config(_)));
}

#[test]
fn saccade_holds_offset_until_interval_elapses() {
    let cfg = SaccadeConfig {
        update_min: 100.0,
        update_max: 100.0,
        gain: 1.0,
    };
    let mut s = Saccade::new(cfg, rng(3)).unwrap();
    let face = apply(&mut s, 50.0);
    assert_eq!(s.offset(), (0.0, 0.0));
    assert_eq!(face.eyes.left.gaze_x, 0.0);

    let face = apply(&mut s, 60.0);
    let (x, y) = s.offset();
    assert!(x != 0.0 || y != 0.0);
    assert_eq!(face.eyes.left.gaze_x, x);
    assert_eq!(face.eyes.right.gaze_y, y);

    let face = apply(&mut s, 10.0);
    assert_eq!(s.offset(), (x, y));
    assert_eq!(face.eyes.left.gaze_x, x);
}

#[test]
fn saccade_offsets_accumulate_on_a_reused_state() {
    let cfg = SaccadeConfig {
        update_min: 0.0,
        update_max: 0.0,
        gain: 1.0,
    };
    let mut s = Saccade::new(cfg, rng(11)).unwrap();
    let mut face = FaceState::default();
    s.apply(1.0, &mut face).unwrap();
    let first = s.offset().0;
    s.apply(0.0, &mut face).unwrap();
    assert_eq!(s.offset().0, first);
    assert!((face.eyes.left.gaze_x - 2.0 * first).abs() < 1e-12);
}

#[test]
fn saccade_zero_gain_never_moves() {
    let cfg = SaccadeConfig {
        gain: 0.0,
        ..SaccadeConfig::default()
    };
    let mut s = Saccade::new(cfg, rng(5)).unwrap();
    for _ in 0..100 {
        let face = apply(&mut s, 100.0);
        assert_eq!(face.eyes.left.gaze_x, 0.0);
    }
}

#[test]
fn breath_is_always_a_quantized_step() {
    let mut b = Breath::new(BreathConfig { duration: 1000.0 }).unwrap();
    for i in 0..500 {
        let face = apply(&mut b, 7.0 + f64::from(i % 5));
        let steps = face.breath * Breath::STEPS;
        assert!((steps - steps.round()).abs() < 1e-12, "{}", face.breath);
        assert!((-1.0..=1.0).contains(&face.breath));
    }
}

#[test]
fn breath_time_wraps_at_duration() {
    let mut b = Breath::new(BreathConfig { duration: 1000.0 }).unwrap();
    apply(&mut b, 2250.0);
    assert!((b.phase_ms() - 250.0).abs() < 1e-9);
    let face = apply(&mut b, 0.0);
    assert_eq!(face.breath, 1.0);
    let face = apply(&mut b, 500.0);
    assert_eq!(face.breath, -1.0);
}

#[test]
fn breath_rejects_zero_duration() {
    assert!(Breath::new(BreathConfig { duration: 0.0 }).is_err());
}

#[test]
fn pipeline_runs_in_order_and_stops_on_error() {
    let mut p = ModifierPipeline::new();
    p.push(|_: f64, f: &mut FaceState| -> FaceResult<()> {
        f.mouth.open = 0.5;
        Ok(())
    });
    p.push(|_: f64, f: &mut FaceState| -> FaceResult<()> {
        f.mouth.open *= 2.0;
        Ok(())
    });
    let mut face = FaceState::default();
    p.run(16.0, &mut face).unwrap();
    assert_eq!(face.mouth.open, 1.0);

    p.push(|_: f64, _: &mut FaceState| -> FaceResult<()> {
        Err(FaceError::modifier("boom"))
    });
    p.push(|_: f64, f: &mut FaceState| -> FaceResult<()> {
        f.mouth.open = 0.0;
        Ok(())
    });
    let mut face = FaceState::default();
    let err = p.run(16.0, &mut face).unwrap_err();
    assert!(matches!(err, FaceError::Modifier(_)));
    assert_eq!(face.mouth.open, 1.0);
    assert_eq!(p.len(), 4);
}
