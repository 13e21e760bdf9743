use crate::foundation::core::Rgba8;
use crate::foundation::math::lerp_rgba;

/// Colour of the oldest points in the trailing window.
pub const TRAIL_LIGHTEST: Rgba8 = Rgba8::rgb(230, 230, 230);
/// Colour of the newest point in the trailing window.
pub const TRAIL_DARKEST: Rgba8 = Rgba8::BLACK;

/// Trail colour of the `rank`-th drawn point (1 = oldest) in a window of `window` points.
///
/// Shade darkens linearly with rank, so the newest point of a full window is black and a window
/// that is still filling up never reaches full black.
pub fn trail_color(rank: usize, window: usize) -> Rgba8 {
    if window == 0 {
        return TRAIL_LIGHTEST;
    }
    lerp_rgba(rank as f64 / window as f64, TRAIL_LIGHTEST, TRAIL_DARKEST)
}

/// Banded heatmap colour for a pixel visited `visits` times.
pub fn heatmap_color(visits: u32) -> Rgba8 {
    const LOW_BAND: f64 = 5.0;
    const HIGH_BAND: f64 = 150.0;

    let v = f64::from(visits);
    if v < 1.0 {
        return Rgba8::WHITE;
    }
    if v <= LOW_BAND {
        return lerp_rgba(
            v / LOW_BAND,
            Rgba8::rgb(177, 185, 220),
            Rgba8::rgb(21, 21, 88),
        );
    }
    if v <= HIGH_BAND {
        return lerp_rgba(
            (v - LOW_BAND) / (HIGH_BAND - LOW_BAND),
            Rgba8::rgb(133, 51, 122),
            Rgba8::rgb(239, 159, 12),
        );
    }
    Rgba8::rgb(235, 70, 25)
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
