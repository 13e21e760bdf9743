use super::*;

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(0.0, 2.0, 10.0), 2.0);
    assert_eq!(lerp(1.0, 2.0, 10.0), 10.0);
    assert_eq!(lerp(0.5, 2.0, 10.0), 6.0);
}

#[test]
fn lerp_rgba_clamps_t() {
    let a = Rgba8::rgb(230, 230, 230);
    let b = Rgba8::BLACK;
    assert_eq!(lerp_rgba(-1.0, a, b), a);
    assert_eq!(lerp_rgba(2.0, a, b), b);
    assert_eq!(lerp_rgba(0.5, a, b), Rgba8::rgb(115, 115, 115));
}

#[test]
fn force_odd_only_touches_even_values() {
    assert_eq!(force_odd(0), 1);
    assert_eq!(force_odd(100), 101);
    assert_eq!(force_odd(101), 101);
}
