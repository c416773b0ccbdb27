// Integration tests (native) for the `cat-pounce` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

#[test]
fn tunables_are_coherent() {
    assert!(cat_pounce::TOUCH_ACCURACY > 0.0);
    assert!(cat_pounce::DOT_RADIUS > 0.0);
    assert!(cat_pounce::MINIMUM_SPEED > 0.0);
    assert!(cat_pounce::MINIMUM_SPEED < cat_pounce::INITIAL_SPEED);
    assert!(cat_pounce::INITIAL_SPEED <= cat_pounce::MAXIMUM_SPEED);
    assert!(
        cat_pounce::FRICTION_COEFFICIENT > 0.0 && cat_pounce::FRICTION_COEFFICIENT < 1.0,
        "friction must shed some speed but never all of it in one frame"
    );
    assert!(cat_pounce::GRAVITY_SCALE > 0.0);
}

#[test]
fn colors_are_css_hex() {
    for color in [cat_pounce::DOT_COLOR, cat_pounce::BACKGROUND_COLOR] {
        assert!(color.starts_with('#'), "'{color}' is not a hex color");
        assert_eq!(color.len(), 7, "'{color}' should be #rrggbb");
        assert!(
            color[1..].chars().all(|c| c.is_ascii_hexdigit()),
            "'{color}' has non-hex digits"
        );
    }
}
