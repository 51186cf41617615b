//! CPU-side geometry for one sprite frame
//!
//! Quads become two triangles each and lines become vertex pairs, ready for
//! the triangle, line and glyph passes of [`SpritePipeline`](super::SpritePipeline).
//! Glyph quads sample the text atlas instead of the block image.

use super::types::SpriteVertex;

/// Axis-aligned rectangle in pixels, origin at the top-left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of `size` pixels at (`x`, `y`)
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Vertices for one frame of 2D drawing
#[derive(Clone, Debug, Default)]
pub struct SpriteBatch {
    triangles: Vec<SpriteVertex>,
    lines: Vec<SpriteVertex>,
    glyphs: Vec<SpriteVertex>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the block image stretched over `rect`, multiplied by `tint`
    pub fn push_sprite(&mut self, rect: Rect, tint: [f32; 4]) {
        let corners = [
            ([rect.x, rect.y], [0.0, 0.0]),
            ([rect.right(), rect.y], [1.0, 0.0]),
            ([rect.right(), rect.bottom()], [1.0, 1.0]),
            ([rect.x, rect.bottom()], [0.0, 1.0]),
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            let (position, uv) = corners[idx];
            self.triangles.push(SpriteVertex::textured(position, uv, tint));
        }
    }

    /// Fill `rect` with a flat color
    pub fn push_rect(&mut self, rect: Rect, color: [f32; 4]) {
        let corners = [
            [rect.x, rect.y],
            [rect.right(), rect.y],
            [rect.right(), rect.bottom()],
            [rect.x, rect.bottom()],
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            self.triangles.push(SpriteVertex::solid(corners[idx], color));
        }
    }

    /// One-pixel line from `from` to `to`
    pub fn push_line(&mut self, from: [f32; 2], to: [f32; 2], color: [f32; 4]) {
        self.lines.push(SpriteVertex::solid(from, color));
        self.lines.push(SpriteVertex::solid(to, color));
    }

    /// Draw the atlas region `uv_min`..`uv_max` over `rect` as coverage for `color`
    pub fn push_glyph(&mut self, rect: Rect, uv_min: [f32; 2], uv_max: [f32; 2], color: [f32; 4]) {
        let corners = [
            ([rect.x, rect.y], uv_min),
            ([rect.right(), rect.y], [uv_max[0], uv_min[1]]),
            ([rect.right(), rect.bottom()], uv_max),
            ([rect.x, rect.bottom()], [uv_min[0], uv_max[1]]),
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            let (position, uv) = corners[idx];
            self.glyphs.push(SpriteVertex::textured(position, uv, color));
        }
    }

    /// Outline `rect` with four lines
    pub fn push_outline(&mut self, rect: Rect, color: [f32; 4]) {
        let tl = [rect.x, rect.y];
        let tr = [rect.right(), rect.y];
        let br = [rect.right(), rect.bottom()];
        let bl = [rect.x, rect.bottom()];
        self.push_line(tl, tr, color);
        self.push_line(tr, br, color);
        self.push_line(br, bl, color);
        self.push_line(bl, tl, color);
    }

    pub fn triangles(&self) -> &[SpriteVertex] {
        &self.triangles
    }

    pub fn lines(&self) -> &[SpriteVertex] {
        &self.lines
    }

    pub fn glyphs(&self) -> &[SpriteVertex] {
        &self.glyphs
    }

    /// Number of quads pushed (sprites and flat rectangles)
    pub fn quad_count(&self) -> usize {
        self.triangles.len() / 6
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty() && self.glyphs.is_empty()
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
        self.lines.clear();
        self.glyphs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_is_two_textured_triangles() {
        let mut batch = SpriteBatch::new();
        batch.push_sprite(Rect::square(30.0, 60.0, 30.0), [1.0; 4]);

        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.triangles().len(), 6);
        assert!(batch.triangles().iter().all(|v| v.textured == 1.0));

        let xs: Vec<f32> = batch.triangles().iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| x == 30.0 || x == 60.0));
        assert_eq!(batch.triangles()[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_rect_is_untextured() {
        let mut batch = SpriteBatch::new();
        batch.push_rect(Rect::new(0.0, 0.0, 10.0, 5.0), [0.0, 0.0, 0.0, 0.5]);
        assert!(batch.triangles().iter().all(|v| v.textured == 0.0));
        assert_eq!(batch.triangles()[2].position, [10.0, 5.0]);
    }

    #[test]
    fn test_outline_is_four_lines() {
        let mut batch = SpriteBatch::new();
        batch.push_outline(Rect::square(0.0, 0.0, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.line_count(), 4);
        assert_eq!(batch.quad_count(), 0);
    }

    #[test]
    fn test_glyph_maps_atlas_region() {
        let mut batch = SpriteBatch::new();
        batch.push_glyph(Rect::new(5.0, 5.0, 10.0, 20.0), [0.25, 0.5], [0.5, 0.75], [1.0; 4]);

        assert_eq!(batch.glyph_count(), 1);
        assert_eq!(batch.quad_count(), 0);
        assert_eq!(batch.glyphs()[0].uv, [0.25, 0.5]);
        assert_eq!(batch.glyphs()[2].position, [15.0, 25.0]);
        assert_eq!(batch.glyphs()[2].uv, [0.5, 0.75]);
        assert_eq!(batch.glyphs()[5].uv, [0.25, 0.75]);
    }

    #[test]
    fn test_clear() {
        let mut batch = SpriteBatch::new();
        batch.push_line([0.0, 0.0], [1.0, 1.0], [1.0; 4]);
        batch.push_glyph(Rect::square(0.0, 0.0, 1.0), [0.0; 2], [1.0; 2], [1.0; 4]);
        assert!(!batch.is_empty());
        batch.clear();
        assert!(batch.is_empty());
    }
}
