use crate::canvas::CanvasOperations;
use crate::color::ColorContext;
use crate::config::EditorConfig;
use crate::persistence::CanvasStore;
use crate::raster::ImageSource;
use crate::surface::DrawingSurface;

/// Everything a command touches while it executes. Created once per
/// editing session and lent to the engine and commands.
pub struct CommandContext {
    /// The raster being drawn on
    pub surface: Box<dyn DrawingSurface>,
    /// Colors the live tools read
    pub colors: ColorContext,
    /// Canvas size and resize handles
    pub canvas: CanvasOperations,
    /// Region capture used when replaying a resize
    pub images: Box<dyn ImageSource>,
    /// Where `save_canvas` writes the raster
    pub store: Box<dyn CanvasStore>,
    pub storage_key: String,
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("surface", &self.surface.dimensions())
            .field("colors", &self.colors)
            .field("canvas", &self.canvas)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

impl CommandContext {
    /// Create a context whose canvas manager and surface follow `config`
    pub fn new(
        config: &EditorConfig,
        mut surface: Box<dyn DrawingSurface>,
        images: Box<dyn ImageSource>,
        store: Box<dyn CanvasStore>,
    ) -> Self {
        let canvas = CanvasOperations::new(config.initial_canvas, config.min_canvas, config.anchor_offset);
        if surface.dimensions() != canvas.dimensions() {
            surface.resize(canvas.dimensions());
        }
        Self {
            surface,
            colors: ColorContext::default(),
            canvas,
            images,
            store,
            storage_key: config.storage_key.clone(),
        }
    }
}
