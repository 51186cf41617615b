//! Text with a glyph atlas
//!
//! Glyphs are rasterized with fontdue on first use and shelf-packed into a
//! single-channel atlas kept on the CPU. [`SpritePipeline`](crate::SpritePipeline)
//! re-uploads the atlas whenever new glyphs were added and draws the glyph
//! quads of a [`SpriteBatch`] using the atlas as coverage.

use std::collections::HashMap;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};

use crate::pipeline::{Rect, SpriteBatch};
use crate::texture::AssetError;

/// Side of the square atlas texture in pixels
pub const ATLAS_SIZE: u32 = 512;
const GLYPH_PADDING: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Read and parse a TrueType/OpenType font
pub fn load_font(path: impl AsRef<Path>) -> Result<Font, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::from_bytes(bytes, FontSettings::default()).map_err(|message| AssetError::Decode {
        path: path.to_path_buf(),
        message: message.to_string(),
    })
}

/// One font's rasterized glyphs plus the layout used to place them
pub struct GlyphAtlas {
    font: Font,
    layout: Layout,
    pixels: Vec<u8>,
    glyphs: HashMap<GlyphRasterConfig, CachedGlyph>,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
    dirty: bool,
}

impl GlyphAtlas {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            pixels: vec![0; (ATLAS_SIZE * ATLAS_SIZE) as usize],
            glyphs: HashMap::new(),
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
            dirty: false,
        }
    }

    /// Atlas coverage values, `ATLAS_SIZE` bytes per row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of distinct glyphs rasterized so far
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// True when glyphs were added since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Width and line height of `text` at `size` pixels
    ///
    /// The width runs to the pen position after the last glyph, so trailing
    /// spaces count.
    pub fn measure(&mut self, text: &str, size: f32) -> (f32, f32) {
        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[&self.font], &TextStyle::new(text, size, 0));

        let width = self
            .layout
            .glyphs()
            .iter()
            .map(|g| {
                let metrics = self.font.metrics_indexed(g.key.glyph_index, size);
                (g.x - metrics.xmin as f32 + metrics.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let height = self
            .font
            .horizontal_line_metrics(size)
            .map_or(size, |line| line.new_line_size);
        (width, height)
    }

    /// Lay out `text` with its top-left corner at (`x`, `y`) and add its glyphs to `batch`
    pub fn push_text(
        &mut self,
        batch: &mut SpriteBatch,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: [f32; 4],
    ) {
        self.layout.reset(&LayoutSettings {
            x,
            y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[&self.font], &TextStyle::new(text, size, 0));

        // Copied out so the layout borrow ends before the atlas is written
        let placed: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, gx, gy, width, height) in placed {
            let Some(glyph) = self.glyph(key) else {
                continue;
            };
            let rect = Rect::new(gx, gy, width as f32, height as f32);
            batch.push_glyph(rect, glyph.uv_min, glyph.uv_max, color);
        }
    }

    /// Like [`push_text`](Self::push_text) with `center_x` as the horizontal middle
    pub fn push_text_centered(
        &mut self,
        batch: &mut SpriteBatch,
        text: &str,
        center_x: f32,
        y: f32,
        size: f32,
        color: [f32; 4],
    ) {
        let (width, _) = self.measure(text, size);
        self.push_text(batch, text, center_x - width / 2.0, y, size, color);
    }

    fn glyph(&mut self, key: GlyphRasterConfig) -> Option<CachedGlyph> {
        if let Some(glyph) = self.glyphs.get(&key) {
            return Some(*glyph);
        }

        let (metrics, bitmap) = self.font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let glyph = self.place(&bitmap, metrics.width as u32, metrics.height as u32)?;
        self.glyphs.insert(key, glyph);
        Some(glyph)
    }

    /// Copy a coverage bitmap into the next free shelf slot
    fn place(&mut self, bitmap: &[u8], width: u32, height: u32) -> Option<CachedGlyph> {
        if width + 2 * GLYPH_PADDING > ATLAS_SIZE || height + 2 * GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("Glyph of {}x{} px does not fit the {}px atlas", width, height, ATLAS_SIZE);
            return None;
        }
        if self.full {
            return None;
        }

        if self.cursor_x + width + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + height + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("Glyph atlas is full; further glyphs are skipped");
            self.full = true;
            return None;
        }

        let (gx, gy) = (self.cursor_x, self.cursor_y);
        let row_len = width as usize;
        for (row, src) in bitmap.chunks_exact(row_len).take(height as usize).enumerate() {
            let start = (gy as usize + row) * ATLAS_SIZE as usize + gx as usize;
            self.pixels[start..start + row_len].copy_from_slice(src);
        }

        self.cursor_x += width + GLYPH_PADDING;
        self.row_height = self.row_height.max(height);
        self.dirty = true;

        let atlas = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas, gy as f32 / atlas],
            uv_max: [(gx + width) as f32 / atlas, (gy + height) as f32 / atlas],
        })
    }
}
