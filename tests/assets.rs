//! The shipped assets load with the default configuration

use toybox::config::PuzzleConfig;
use toybox_render::{load_block_image, load_font, GlyphAtlas, SpriteBatch};

#[test]
fn test_default_block_image_loads() {
    let config = PuzzleConfig::default();
    let image = load_block_image(&config.image_path, config.block_size).unwrap();
    assert_eq!(image.dimensions(), (30, 30));
}

#[test]
fn test_default_font_renders_title() {
    let config = PuzzleConfig::default();
    let mut atlas = GlyphAtlas::new(load_font(&config.font_path).unwrap());
    let mut batch = SpriteBatch::new();
    atlas.push_text(&mut batch, "Cat Tetris", 0.0, 30.0, 60.0, [1.0; 4]);
    assert_eq!(batch.glyph_count(), 9);
}
