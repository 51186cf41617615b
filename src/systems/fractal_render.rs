//! GPU rendering for the fractal wireframe
//!
//! Owns the render context and line pipeline, uploads the mesh whenever it
//! grows, and draws it with the configured camera.

use std::sync::Arc;
use winit::window::Window;

use toybox_fractal::FractalMesh;
use toybox_math::{mat4, Mat4, Vec3};
use toybox_render::{LinePipeline, LineUniforms, RenderContext, RenderError};

use crate::config::{CameraConfig, FractalConfig};

/// Manages GPU rendering of the fractal
pub struct FractalRenderSystem {
    context: RenderContext,
    pipeline: LinePipeline,
    camera: CameraConfig,
    clear_color: [f32; 4],
    line_color: [f32; 4],
}

impl FractalRenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &FractalConfig) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, config.window.vsync))?;

        let mut pipeline = LinePipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.config.width, context.config.height);

        Ok(Self {
            context,
            pipeline,
            camera: config.camera.clone(),
            clear_color: config.clear_color,
            line_color: config.line_color,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Reconfigure the surface at its current size (after it was lost)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.resize(size.width, size.height);
    }

    /// Upload mesh to GPU
    pub fn upload_mesh(&mut self, mesh: &FractalMesh) {
        let positions = mesh.vertex_positions();
        let indices = mesh.line_indices();
        self.pipeline.upload_mesh(&self.context.device, &positions, &indices);
        log::info!(
            "Uploaded {} vertices and {} faces ({} line indices)",
            mesh.vertex_count(),
            mesh.face_count(),
            indices.len()
        );
    }

    /// Render a single frame with the given model transform
    pub fn render_frame(&mut self, model: Mat4) -> Result<(), RenderError> {
        let (view, projection) = camera_matrices(&self.camera, self.context.aspect_ratio());
        let uniforms = LineUniforms {
            model,
            view,
            projection,
            color: self.line_color,
        };
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);

        let output = self.context.acquire_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Fractal Encoder"),
            });

        let bg = &self.clear_color;
        self.pipeline.render(
            &mut encoder,
            &view,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// View and projection matrices for `camera` at the given aspect ratio
pub fn camera_matrices(camera: &CameraConfig, aspect: f32) -> (Mat4, Mat4) {
    let view = mat4::look_at(
        Vec3::from_array(camera.eye),
        Vec3::from_array(camera.target),
        Vec3::from_array(camera.up),
    );
    let projection = mat4::perspective(camera.fov.to_radians(), aspect, camera.near, camera.far);
    (view, projection)
}
