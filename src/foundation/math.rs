use crate::foundation::core::Rgba8;

pub(crate) fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Channel-wise linear interpolation, `t` clamped to `[0, 1]`.
pub(crate) fn lerp_rgba(t: f64, a: Rgba8, b: Rgba8) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| lerp(t, f64::from(x), f64::from(y)).round().clamp(0.0, 255.0) as u8;
    Rgba8 {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

/// Rounds even dimensions up to the next odd value.
pub(crate) fn force_odd(v: u32) -> u32 {
    if v.is_multiple_of(2) { v + 1 } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
