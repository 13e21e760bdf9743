use std::io::{BufWriter, Write as _};
use std::path::Path;

use image::RgbaImage;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RideError, RideResult};
use crate::foundation::math::force_odd;
use crate::render::text::TextStamper;

/// Owned RGBA8 raster a single frame is drawn into.
///
/// Width and height are always odd: even sizes are rounded up so centred draw operations land on
/// a pixel, and so every frame of a run has the same output size.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Opaque white canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(
                force_odd(width),
                force_odd(height),
                Rgba8::WHITE.into(),
            ),
        }
    }

    /// Canvas seeded with a copy of every pixel of `background`; any padding column/row added to
    /// make the size odd is white.
    pub fn from_background(background: &RgbaImage) -> Self {
        let (w, h) = background.dimensions();
        if w == force_odd(w) && h == force_odd(h) {
            return Self {
                image: background.clone(),
            };
        }
        let mut canvas = Self::blank(w, h);
        image::imageops::replace(&mut canvas.image, background, 0, 0);
        canvas
    }

    /// Decodes a background image from disk.
    #[tracing::instrument]
    pub fn load_background(path: &Path) -> RideResult<RgbaImage> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| RideError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| RideError::io(path, e))?;
        let img = reader
            .decode()
            .map_err(|e| RideError::encode(format!("decode '{}': {e}", path.display())))?;
        Ok(img.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at `(x, y)`, `None` off-canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.image.get_pixel_checked(x, y).map(|px| Rgba8::from(*px))
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Blends `color` into the pixel at `p` at full weight.
    pub fn composite_point(&mut self, p: (i64, i64), color: Rgba8) {
        self.composite_square(p, color, 0);
    }

    /// Blends `color` into the `(2r+1)²` box around `center`.
    ///
    /// Each pixel's blend weight is `(1 - d/r)` for its Euclidean distance `d` from the centre,
    /// scaled by `color.a / 255`; pixels at or beyond `r` are untouched. Blending interpolates
    /// linearly from the existing pixel towards `color`, so later calls land on top of earlier
    /// ones: callers must issue draws in point-stream order for runs to be reproducible.
    pub fn composite_square(&mut self, center: (i64, i64), color: Rgba8, radius: u32) {
        let r = i64::from(radius);
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        let alpha = f64::from(color.a) / 255.0;

        for y in (center.1 - r).max(0)..=(center.1 + r).min(h - 1) {
            for x in (center.0 - r).max(0)..=(center.0 + r).min(w - 1) {
                let weight = if radius == 0 {
                    1.0
                } else {
                    let (dx, dy) = ((x - center.0) as f64, (y - center.1) as f64);
                    (1.0 - (dx * dx + dy * dy).sqrt() / f64::from(radius)).clamp(0.0, 1.0)
                };
                self.blend(x as u32, y as u32, color, weight * alpha);
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba8, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        // Colour channels interpolate towards `color`; coverage accumulates like `over`.
        let src = [color.r, color.g, color.b, 255];
        for (dst, s) in px.0.iter_mut().zip(src) {
            let v = f64::from(*dst) * (1.0 - alpha) + f64::from(s) * alpha;
            *dst = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Stamps `text` with its baseline starting at `(x, y)`.
    pub fn stamp_text(
        &mut self,
        x: i64,
        y: i64,
        text: &str,
        stamper: &TextStamper,
    ) -> RideResult<()> {
        let available = i64::from(self.width()) - x.max(0);
        if available <= 0 {
            return Ok(());
        }
        let Some(mask) = stamper.rasterize(text, available as u32)? else {
            return Ok(());
        };

        let ink = stamper.ink();
        let ink_alpha = f64::from(ink.a) / 255.0;
        let top = y - i64::from(mask.baseline);
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));

        for (row, line) in mask.coverage.chunks_exact(mask.width as usize).enumerate() {
            let cy = top + row as i64;
            if !(0..h).contains(&cy) {
                continue;
            }
            for (col, &cov) in line.iter().enumerate() {
                let cx = x + col as i64;
                if cov == 0 || !(0..w).contains(&cx) {
                    continue;
                }
                self.blend(cx as u32, cy as u32, ink, f64::from(cov) / 255.0 * ink_alpha);
            }
        }
        Ok(())
    }

    /// Encodes the canvas as PNG at `path`.
    ///
    /// Failing to create the file is [`RideError::Io`]; failing to encode is
    /// [`RideError::Encode`].
    pub fn persist(&self, path: &Path) -> RideResult<()> {
        let file = std::fs::File::create(path).map_err(|e| RideError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.image
            .write_to(&mut writer, image::ImageFormat::Png)
            .map_err(|e| RideError::encode(format!("encode '{}': {e}", path.display())))?;
        writer.flush().map_err(|e| RideError::io(path, e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
