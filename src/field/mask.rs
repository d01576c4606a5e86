use anyhow::{anyhow, Context};
use bevy::math::Vec2;
use bevy::prelude::{info, warn};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

/// Single-channel coverage buffer for the rendered text, top-left origin,
/// y-down. The glyph itself is never drawn; this buffer only exists to be
/// sampled and is dropped once the particles are spawned.
#[derive(Debug, Clone, Default)]
pub struct CoverageMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl CoverageMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Load the first readable font from a priority list. Failure leaves the
/// field without text particles but is otherwise harmless.
pub fn load_first_font(paths: &[String]) -> anyhow::Result<fontdue::Font> {
    for path in paths {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(_) => continue,
        };
        match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
            Ok(font) => {
                info!(target: "field", "loaded font '{path}' for glyph mask");
                return Ok(font);
            }
            Err(e) => warn!(target: "field", "failed to parse font '{path}': {e}"),
        }
    }
    Err(anyhow!("no readable font among {} candidates", paths.len()))
        .context("glyph mask rasterization needs a TTF")
}

/// Lay out `text` at `font_px` and composite the glyph coverage bitmaps into
/// one mask buffer. Whitespace contributes layout advance but no coverage.
pub fn rasterize_text_mask(text: &str, font: &fontdue::Font, font_px: f32) -> CoverageMask {
    let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, font_px, 0));

    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    for g in layout.glyphs() {
        if g.parent.is_whitespace() || g.width == 0 || g.height == 0 {
            continue;
        }
        min = min.min(Vec2::new(g.x, g.y));
        max = max.max(Vec2::new(g.x + g.width as f32, g.y + g.height as f32));
    }
    if min.x > max.x {
        return CoverageMask::default();
    }

    let width = (max.x - min.x).ceil() as usize;
    let height = (max.y - min.y).ceil() as usize;
    let mut data = vec![0u8; width * height];

    for g in layout.glyphs() {
        if g.parent.is_whitespace() || g.width == 0 || g.height == 0 {
            continue;
        }
        let (metrics, bitmap) = font.rasterize(g.parent, font_px);
        let ox = (g.x - min.x).round() as usize;
        let oy = (g.y - min.y).round() as usize;
        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let x = ox + col;
                let y = oy + row;
                if x >= width || y >= height {
                    continue;
                }
                let src = bitmap[row * metrics.width + col];
                let dst = &mut data[y * width + x];
                // Overlapping glyphs keep the strongest coverage.
                *dst = (*dst).max(src);
            }
        }
    }

    CoverageMask { width, height, data }
}

/// Walk the mask on a fixed grid stride and keep every sample whose coverage
/// exceeds `threshold` (0..1). Returns mask-space points (y-down). Count is
/// deterministic for a fixed mask, stride and threshold.
pub fn sample_mask(mask: &CoverageMask, stride: u32, threshold: f32) -> Vec<Vec2> {
    if mask.is_empty() {
        return Vec::new();
    }
    let stride = stride.max(1) as usize;
    let cutoff = (threshold.clamp(0.0, 1.0) * 255.0) as u8;
    let mut points = Vec::new();
    let mut y = 0;
    while y < mask.height {
        let mut x = 0;
        while x < mask.width {
            if mask.data[y * mask.width + x] > cutoff {
                points.push(Vec2::new(x as f32, y as f32));
            }
            x += stride;
        }
        y += stride;
    }
    points
}

/// Mask space (top-left origin, y-down) to world space (mask centered on the
/// origin, y-up).
pub fn mask_to_world(point: Vec2, mask: &CoverageMask) -> Vec2 {
    let half = Vec2::new(mask.width as f32, mask.height as f32) * 0.5;
    Vec2::new(point.x - half.x, half.y - point.y)
}
