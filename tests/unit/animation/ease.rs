use super::*;

#[test]
fn blink_curves_start_and_end_open() {
    for ease in [Ease::LinearInEaseOut, Ease::LinearInLinearOut] {
        assert_eq!(ease.apply(0.0), 1.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn linear_in_ease_out_bottoms_at_quarter() {
    let e = Ease::LinearInEaseOut;
    assert_eq!(e.apply(0.25), 0.0);
    assert!((e.apply(0.5) - 0.0625 * 16.0 / 9.0).abs() < 1e-12);
    assert!(e.apply(0.1) > e.apply(0.2));
    assert!(e.apply(0.5) < e.apply(0.75));
}

#[test]
fn linear_in_linear_out_bottoms_at_half() {
    assert_eq!(Ease::LinearInLinearOut.apply(0.5), 0.0);
    assert_eq!(Ease::LinearInLinearOut.apply(0.75), 0.5);
}

#[test]
fn out_expo_rises_toward_one() {
    let e = Ease::OutExpo;
    assert_eq!(e.apply(0.0), 0.0);
    assert!((e.apply(1.0) - (1.0 - 2f64.powi(-10))).abs() < 1e-12);
    assert!(e.apply(0.1) < e.apply(0.2));
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::LinearInEaseOut.apply(-3.0), 1.0);
    assert_eq!(Ease::OutExpo.apply(-1.0), 0.0);
}
