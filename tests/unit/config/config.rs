use super::*;
use crate::render::decorator::DecoratorSpec;
use crate::state::face::{Emotion, FaceState};
use crate::surface::recording::RecordingSurface;

#[test]
fn defaults_match_the_reference_device() {
    let c = FaceConfig::default();
    assert_eq!((c.surface.width, c.surface.height), (320, 240));
    assert_eq!(c.surface.margin, 60.0);
    assert_eq!(c.tick_budget_ms, 16);
    assert_eq!(c.blink.open_min, 400.0);
    assert_eq!(c.blink.close_max, 400.0);
    assert_eq!(c.saccade.gain, 0.2);
    assert_eq!(c.breath.duration, 6000.0);
    assert_eq!(c.lip_sync.buffer_length, 1024);
    assert!(c.seed.is_none());
    c.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults() {
    let c = FaceConfig::from_json_str(
        r#"{
            "seed": 42,
            "surface": { "width": 400 },
            "blink": { "open_min": 1000, "open_max": 2000 },
            "emotions": { "COLD": { "kind": "sweat", "x": 5, "y": 5 } }
        }"#,
    )
    .unwrap();
    assert_eq!(c.seed, Some(42));
    assert_eq!((c.surface.width, c.surface.height), (400, 240));
    assert_eq!(c.blink.open_min, 1000.0);
    assert_eq!(c.blink.close_min, BlinkConfig::default().close_min);
    assert!(matches!(
        c.emotions.get(Emotion::Cold),
        Some(DecoratorSpec::Sweat(s)) if s.x == 5.0 && s.width == 40.0
    ));
    assert!(c.emotions.get(Emotion::Happy).is_none());
    c.validate().unwrap();
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = FaceConfig::from_json_str("{ \"surfce\": {} }").unwrap_err();
    assert!(matches!(err, FaceError::Serde(_)));
    let msg = err.to_string();
    assert!(msg.starts_with("serialization error: parse face config"));

    let err = FaceConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, FaceError::Config(_)));
}

#[test]
fn validation_rejects_bad_sections() {
    let mut c = FaceConfig::default();
    c.surface.margin = 200.0;
    assert!(matches!(c.validate(), Err(FaceError::Config(_))));

    let mut c = FaceConfig::default();
    c.blink.open_min = 6000.0;
    assert!(c.validate().is_err());

    let mut c = FaceConfig::default();
    c.lip_sync.smoothing = 1.0;
    assert!(c.validate().is_err());

    let mut c = FaceConfig::default();
    c.breath.duration = 0.0;
    assert!(c.validate().is_err());
}

#[test]
fn round_trips_through_json() {
    let c = FaceConfig {
        seed: Some(9),
        ..FaceConfig::default()
    };
    let back = FaceConfig::from_json_str(&c.to_json_string().unwrap()).unwrap();
    assert_eq!(back, c);
}

#[test]
fn builds_a_working_renderer() {
    let c = FaceConfig {
        seed: Some(5),
        ..FaceConfig::default()
    };
    let mut r = c.build_renderer(RecordingSurface::new(320, 240)).unwrap();
    assert_eq!(r.modifiers().len(), 3);
    let budget = c.renderer_options().tick_budget;
    assert_eq!(budget, Some(Duration::from_millis(16)));

    let reference = FaceState::default();
    let first = r.update(16.0, &reference).unwrap();
    assert!(first.rendered);
    assert_eq!(r.surface().open_regions(), 0);

    let err = c.build_renderer(RecordingSurface::new(640, 480)).unwrap_err();
    assert!(matches!(err, FaceError::Config(_)));
}

#[test]
fn configured_lip_sync_reaches_the_mouth() {
    let c = FaceConfig::from_json_str(
        r#"{ "seed": 2, "lip_sync": { "gain": 0.5, "smoothing": 0.5 } }"#,
    )
    .unwrap();
    let (mut r, mut input) = c
        .build_renderer_with_lip_sync(RecordingSurface::new(320, 240))
        .unwrap();
    assert_eq!(r.modifiers().len(), 4);

    let open = input.push(&[0.25; 1024]).unwrap();
    assert!((open - 0.25).abs() < 1e-9);

    r.update(16.0, &FaceState::default()).unwrap();
    assert!((r.last_drawn().mouth.open - 0.25).abs() < 1e-9);
}
