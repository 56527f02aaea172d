use super::*;

#[test]
fn endpoints_are_fixed_for_every_curve() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
    ] {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
    }
}

#[test]
fn out_quad_front_loads_progress() {
    assert!(Ease::OutQuad.apply(0.5) > 0.5);
    assert!(Ease::InQuad.apply(0.5) < 0.5);
}

#[test]
fn sample_fade_interpolates_and_clamps() {
    assert_eq!(Ease::Linear.sample_fade(1.0, 0.0, 0, 100), 1.0);
    assert_eq!(Ease::Linear.sample_fade(1.0, 0.0, 50, 100), 0.5);
    assert_eq!(Ease::Linear.sample_fade(1.0, 0.0, 100, 100), 0.0);
    assert_eq!(Ease::Linear.sample_fade(1.0, 0.0, 500, 100), 0.0);
    assert_eq!(Ease::OutQuad.sample_fade(1.0, 0.0, 0, 0), 0.0);
}

#[test]
fn serde_uses_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::OutQuad).unwrap(),
        "\"out_quad\""
    );
    let e: Ease = serde_json::from_str("\"in_out_quad\"").unwrap();
    assert_eq!(e, Ease::InOutQuad);
}
