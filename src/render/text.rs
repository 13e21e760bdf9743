use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RideError, RideResult};

const MAX_MASK_DIM: u32 = 16_384;

/// Single-typeface text rasterizer shared read-only by every worker.
///
/// Glyphs are shaped and rasterized through `usvg`/`resvg`; the result is a coverage mask the
/// canvas blends in the stamper's ink colour.
#[derive(Clone)]
pub struct TextStamper {
    fontdb: Arc<usvg::fontdb::Database>,
    family: String,
    font_size: f32,
    ink: Rgba8,
}

impl std::fmt::Debug for TextStamper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStamper")
            .field("family", &self.family)
            .field("font_size", &self.font_size)
            .field("ink", &self.ink)
            .finish()
    }
}

/// Per-pixel text coverage, anchored so that row `baseline` is the text baseline.
#[derive(Clone, Debug)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
    pub coverage: Vec<u8>,
}

impl TextStamper {
    /// Loads a `.ttf`/`.otf`/`.ttc` file.
    #[tracing::instrument]
    pub fn from_path(path: &Path, font_size: f32) -> RideResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| RideError::io(path, e))?;
        Self::from_bytes(bytes, font_size)
    }

    pub fn from_bytes(bytes: Vec<u8>, font_size: f32) -> RideResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes);
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .ok_or_else(|| RideError::text("font data contains no usable face"))?;
        Self::with_db(db, family, font_size)
    }

    /// Uses the system's default sans-serif face.
    pub fn system_default(font_size: f32) -> RideResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::SansSerif],
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let family = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .and_then(|id| db.face(id))
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .ok_or_else(|| RideError::text("no system fonts available"))?;
        Self::with_db(db, family, font_size)
    }

    fn with_db(db: usvg::fontdb::Database, family: String, font_size: f32) -> RideResult<Self> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(RideError::validation("font size must be positive"));
        }
        tracing::debug!(%family, font_size, "font loaded");
        Ok(Self {
            fontdb: Arc::new(db),
            family,
            font_size,
            ink: Rgba8::BLACK,
        })
    }

    pub fn ink(&self) -> Rgba8 {
        self.ink
    }

    /// Rasterizes `text` into a mask at most `max_width` pixels wide.
    ///
    /// Returns `Ok(None)` when there is nothing to draw.
    pub fn rasterize(&self, text: &str, max_width: u32) -> RideResult<Option<GlyphMask>> {
        let width = max_width.min(MAX_MASK_DIM);
        if width == 0 || text.trim().is_empty() {
            return Ok(None);
        }
        let height = ((self.font_size * 1.5).ceil() as u32).clamp(1, MAX_MASK_DIM);
        let baseline = ((self.font_size * 1.2).ceil() as u32).min(height);

        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{baseline}" font-family="{family}" font-size="{size}" fill="black">{text}</text></svg>"#,
            family = escape_xml(&css_family(&self.family)),
            size = self.font_size,
            text = escape_xml(text),
        );

        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse text overlay")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| RideError::text("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        let coverage = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
        Ok(Some(GlyphMask {
            width,
            height,
            baseline,
            coverage,
        }))
    }
}

/// Quotes a family name for CSS with a quote character the name does not contain.
fn css_family(name: &str) -> String {
    if !name.contains('\'') {
        format!("'{name}'")
    } else if !name.contains('"') {
        format!("\"{name}\"")
    } else {
        name.replace(['\'', '"'], "")
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
