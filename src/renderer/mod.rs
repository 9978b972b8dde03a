//! WebGPU rendering module
//!
//! The runtime only sees `SceneRenderer`: "render this frame" and "resize".
//! `RenderState` draws the backdrop with wgpu; `HeadlessRenderer` builds the
//! same geometry without a GPU for native runs.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{AvatarPose, PortalPose, SceneFrame, StarLayers, StarStreak, Viewport};

/// Why a frame could not be drawn
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Surface has no usable format")]
    Unsupported,

    #[error("Surface lost; reconfigured")]
    SurfaceLost,

    #[error("Out of GPU memory")]
    OutOfMemory,

    #[error("Timed out acquiring the next frame")]
    Timeout,

    #[error("Surface error: {0}")]
    Surface(String),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            other => RenderError::Surface(other.to_string()),
        }
    }
}

/// The render collaborator driven once per tick
pub trait SceneRenderer {
    fn render(&mut self, frame: &SceneFrame) -> Result<(), RenderError>;
    fn resize(&mut self, viewport: Viewport);
}

/// GPU-less renderer: builds the geometry and keeps counters
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    layers: StarLayers,
    pub frames: u64,
    pub last_vertex_count: usize,
    pub viewport: Option<Viewport>,
}

impl HeadlessRenderer {
    pub fn new(layers: StarLayers) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn render(&mut self, frame: &SceneFrame) -> Result<(), RenderError> {
        let vertices = shapes::scene(frame, &self.layers.stars, &self.layers.sparkles);
        self.last_vertex_count = vertices.len();
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}
