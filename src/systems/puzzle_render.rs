//! GPU rendering for Cat Tetris
//!
//! The board is turned into a [`SpriteBatch`] on the CPU each frame: one block
//! image per occupied cell, grey grid lines, the title and score labels, and
//! the piece chooser or loss overlay when the game is in those phases.

use std::sync::Arc;
use fontdue::Font;
use image::RgbaImage;
use winit::window::Window;

use toybox_puzzle::{Game, Phase, Rgb};
use toybox_render::{GlyphAtlas, Rect, RenderContext, RenderError, SpriteBatch, SpritePipeline};

use crate::config::PuzzleConfig;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const LOST_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.6];

const TITLE_SIZE: f32 = 60.0;
const TITLE_TOP: f32 = 30.0;
const SCORE_SIZE: f32 = 30.0;
const SCORE_POS: [f32; 2] = [10.0, 10.0];
const LOST_SIZE: f32 = 80.0;
const CHOOSER_SIZE: f32 = 30.0;
const CHOOSER_HEADING_TOP: f32 = 50.0;
const CHOOSER_OPTIONS_TOP: f32 = 100.0;
const CHOOSER_OPTION_STEP: f32 = 40.0;

/// How the board maps onto pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Side of one cell in pixels
    pub block_size: f32,
    pub grid_line_color: Rgb,
    /// Multiply the block image by the cell color
    pub tint_blocks: bool,
}

impl BoardLayout {
    pub fn from_config(config: &PuzzleConfig) -> Self {
        Self {
            block_size: config.block_size as f32,
            grid_line_color: config.grid_line_color,
            tint_blocks: config.tint_blocks,
        }
    }
}

fn rgb_to_rgba(color: Rgb) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        1.0,
    ]
}

/// Largest size up to `size` at which `text` fits in `max_width`
fn fit_size(atlas: &mut GlyphAtlas, text: &str, size: f32, max_width: f32) -> f32 {
    let (width, _) = atlas.measure(text, size);
    if width > max_width && width > 0.0 {
        size * max_width / width
    } else {
        size
    }
}

/// Centered label, shrunk when wider than the board
fn push_label(
    batch: &mut SpriteBatch,
    atlas: &mut GlyphAtlas,
    text: &str,
    board_width: f32,
    top: f32,
    size: f32,
    color: [f32; 4],
) {
    let size = fit_size(atlas, text, size, board_width);
    atlas.push_text_centered(batch, text, board_width / 2.0, top, size, color);
}

/// Build everything drawn for one frame of `game`
pub fn build_board_batch(game: &Game, layout: &BoardLayout, atlas: &mut GlyphAtlas) -> SpriteBatch {
    let mut batch = SpriteBatch::new();
    let settings = game.settings();
    let block = layout.block_size;
    let board_width = settings.grid_width as f32 * block;
    let board_height = settings.grid_height as f32 * block;

    if let Phase::Choosing(chooser) = game.phase() {
        push_label(&mut batch, atlas, "Choose your next block:", board_width, CHOOSER_HEADING_TOP, CHOOSER_SIZE, WHITE);
        for (idx, option) in chooser.options().iter().enumerate() {
            let color = if idx == chooser.selected() { RED } else { WHITE };
            let top = CHOOSER_OPTIONS_TOP + idx as f32 * CHOOSER_OPTION_STEP;
            push_label(&mut batch, atlas, option, board_width, top, CHOOSER_SIZE, color);
        }
        return batch;
    }

    push_label(&mut batch, atlas, "Cat Tetris", board_width, TITLE_TOP, TITLE_SIZE, WHITE);
    atlas.push_text(
        &mut batch,
        &format!("Score: {}", game.score()),
        SCORE_POS[0],
        SCORE_POS[1],
        SCORE_SIZE,
        WHITE,
    );

    let grid = game.grid();
    for ((x, y), color) in grid.occupied() {
        let tint = if layout.tint_blocks { rgb_to_rgba(color) } else { WHITE };
        batch.push_sprite(Rect::square(x as f32 * block, y as f32 * block, block), tint);
    }

    let line_color = rgb_to_rgba(layout.grid_line_color);
    for row in 0..settings.grid_height {
        let y = row as f32 * block;
        batch.push_line([0.0, y], [board_width, y], line_color);
    }
    for col in 0..settings.grid_width {
        let x = col as f32 * block;
        batch.push_line([x, 0.0], [x, board_height], line_color);
    }

    if game.is_lost() {
        let size = fit_size(atlas, "YOU LOST", LOST_SIZE, board_width);
        let (_, height) = atlas.measure("YOU LOST", size);
        let band = Rect::new(0.0, (board_height - height) / 2.0, board_width, height);
        batch.push_rect(band, LOST_SHADE);
        batch.push_outline(band, RED);
        atlas.push_text_centered(&mut batch, "YOU LOST", board_width / 2.0, band.y, size, WHITE);
    }

    batch
}

/// Title suffix describing the game state
pub fn puzzle_status(game: &Game) -> String {
    match game.phase() {
        Phase::Playing => format!("Score: {}", game.score()),
        Phase::Choosing(chooser) => format!(
            "Score: {} - You cleared a Tetris! Choose your next block: {} ({}/{})",
            game.score(),
            chooser.selected_name().unwrap_or("?"),
            chooser.selected() + 1,
            chooser.options().len()
        ),
        Phase::Lost => format!("Score: {} - YOU LOST", game.score()),
    }
}

/// Manages GPU rendering of the board
pub struct PuzzleRenderSystem {
    context: RenderContext,
    pipeline: SpritePipeline,
    layout: BoardLayout,
    atlas: GlyphAtlas,
}

impl PuzzleRenderSystem {
    /// Create render system from window, config, the decoded block image and the label font
    pub fn new(
        window: Arc<Window>,
        config: &PuzzleConfig,
        block_image: &RgbaImage,
        font: &Font,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, config.window.vsync))?;
        let pipeline = SpritePipeline::new(
            &context.device,
            &context.queue,
            context.config.format,
            block_image,
        );

        let (width, height) = config.board_size();
        pipeline.update_screen(&context.queue, width.max(1) as f32, height.max(1) as f32);

        Ok(Self {
            context,
            pipeline,
            layout: BoardLayout::from_config(config),
            atlas: GlyphAtlas::new(font.clone()),
        })
    }

    /// Handle window resize; the board stretches to fill the window
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
    }

    /// Reconfigure the surface at its current size (after it was lost)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.resize(size.width, size.height);
    }

    /// Render a single frame of `game`
    pub fn render_frame(&mut self, game: &Game) -> Result<(), RenderError> {
        let batch = build_board_batch(game, &self.layout, &mut self.atlas);
        self.pipeline.upload_atlas(&self.context.queue, &mut self.atlas);

        let output = self.context.acquire_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Puzzle Encoder"),
            });

        self.pipeline.render(
            &self.context.device,
            &mut encoder,
            &view,
            &batch,
            wgpu::Color::BLACK,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
