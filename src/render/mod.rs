//! CPU raster backend: the per-frame canvas, colour palettes and text stamping.

/// RGBA8 canvas with alpha compositing and PNG output.
pub mod canvas;
/// Trail and heatmap colour ramps.
pub mod palette;
/// Font loading and glyph rasterization.
pub mod text;
