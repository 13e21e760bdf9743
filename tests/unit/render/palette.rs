use super::*;

#[test]
fn trail_darkens_with_rank() {
    assert_eq!(trail_color(10, 10), TRAIL_DARKEST);
    assert_eq!(trail_color(0, 10), TRAIL_LIGHTEST);
    assert_eq!(trail_color(11, 10), TRAIL_DARKEST);
    let mid = trail_color(5, 10);
    assert!(mid.r < TRAIL_LIGHTEST.r && mid.r > TRAIL_DARKEST.r);
    assert_eq!(trail_color(3, 0), TRAIL_LIGHTEST);
}

#[test]
fn heatmap_bands() {
    assert_eq!(heatmap_color(0), Rgba8::WHITE);
    assert_eq!(heatmap_color(5), Rgba8::rgb(21, 21, 88));
    assert_eq!(heatmap_color(150), Rgba8::rgb(239, 159, 12));
    assert_eq!(heatmap_color(151), Rgba8::rgb(235, 70, 25));
    assert_eq!(heatmap_color(u32::MAX).a, 255);
}
