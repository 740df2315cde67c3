use std::time::Duration;

use egui::Pos2;
use image::Rgba;
use log::{debug, info};

use crate::canvas::{Anchor, CanvasDimensions};
use crate::color::ColorContext;
use crate::command::{Command, CommandContext, UndoRedoEngine};
use crate::config::EditorConfig;
use crate::error::{ConfigError, PersistenceError, PersistenceResult};
use crate::persistence::CanvasStore;
use crate::raster::{CanvasImage, ImageRef, ImageSource};
use crate::state::{DrawingState, StatePayload, ToolState};
use crate::surface::DrawingSurface;
use crate::tools::{Tool, ToolType};

const BLANK_CANVAS: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// One editing session: the shared command context, the undo/redo engine
/// and the active tool.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    ctx: CommandContext,
    history: UndoRedoEngine,
    tool: ToolType,
}

impl Editor {
    /// Build a session around `surface`. Fails if `config` does not validate.
    pub fn new(
        config: EditorConfig,
        surface: Box<dyn DrawingSurface>,
        images: Box<dyn ImageSource>,
        store: Box<dyn CanvasStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ctx = CommandContext::new(&config, surface, images, store);
        let history = UndoRedoEngine::new(config.resize_replay_delay());
        let mut tool = ToolType::default();
        tool.set_line_width(config.line_width);
        Ok(Self {
            config,
            ctx,
            history,
            tool,
        })
    }

    /// Paint the blank baseline and protect it from undo
    pub fn start(&mut self) {
        let dimensions = self.ctx.canvas.dimensions();
        info!("Starting session on a {}x{} canvas", dimensions.width, dimensions.height);
        self.push_baseline(CanvasImage::filled(dimensions, BLANK_CANVAS));
    }

    /// Throw away the history and start over on a blank canvas
    pub fn new_canvas(&mut self, dimensions: CanvasDimensions) {
        info!("New {}x{} canvas", dimensions.width, dimensions.height);
        self.history.clear_history();
        self.resize_canvas(dimensions);
        let dimensions = self.ctx.canvas.dimensions();
        self.push_baseline(CanvasImage::filled(dimensions, BLANK_CANVAS));
    }

    /// Throw away the history and start over from `image`
    pub fn load_image(&mut self, image: ImageRef) {
        info!("Loading {}x{} image", image.dimensions().width, image.dimensions().height);
        self.history.clear_history();
        self.resize_canvas(image.dimensions());
        self.push_baseline(image);
    }

    /// Reload the canvas persisted under the configured key. Returns false
    /// when nothing was stored.
    pub fn restore_saved(&mut self) -> PersistenceResult<bool> {
        match self.ctx.store.load(&self.ctx.storage_key) {
            Ok(stored) => {
                self.load_image(stored.decode()?);
                Ok(true)
            }
            Err(PersistenceError::NotFound(key)) => {
                debug!("No saved canvas under '{}'", key);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn resize_canvas(&mut self, dimensions: CanvasDimensions) {
        self.ctx.canvas.update_canvas_dimensions(dimensions.width, dimensions.height);
        let committed = self.ctx.canvas.dimensions();
        self.ctx.surface.resize(committed);
    }

    fn push_baseline(&mut self, image: ImageRef) {
        let state = ToolState::capture(
            self.tool.line_width(),
            &self.ctx.colors,
            StatePayload::Drawing(DrawingState { image, replace: true }),
        );
        let command = Command::new(state);
        command.execute_now(&mut self.ctx);
        command.save_canvas(&mut self.ctx);
        self.history.add_command(command);
        self.history.set_min_history_size(1);
    }

    /// Draw a finished command live and record it
    pub async fn commit(&mut self, command: Command) {
        command.execute(&mut self.ctx).await;
        self.history.add_command(command);
    }

    pub fn set_tool(&mut self, tool: ToolType) {
        self.tool.deactivate();
        self.tool = tool;
        self.tool.activate();
        debug!("Active tool: {}", self.tool.name());
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolType {
        &mut self.tool
    }

    pub async fn pointer_down(&mut self, pos: Pos2) {
        if let Some(command) = self.tool.on_pointer_down(pos, &self.ctx.colors) {
            self.commit(command).await;
        }
    }

    pub async fn pointer_move(&mut self, pos: Pos2) {
        if let Some(command) = self.tool.on_pointer_move(pos, &self.ctx.colors) {
            self.commit(command).await;
        }
    }

    pub async fn pointer_up(&mut self, pos: Pos2) {
        if let Some(command) = self.tool.on_pointer_up(pos, &self.ctx.colors) {
            self.commit(command).await;
        }
    }

    /// Confirm the text of the active text tool
    pub async fn commit_text(&mut self, text: &str) {
        let ToolType::Text(tool) = &mut self.tool else {
            debug!("No text tool active");
            return;
        };
        if let Some(command) = tool.commit(text, &self.ctx.colors) {
            self.commit(command).await;
        }
    }

    pub fn begin_canvas_drag(&mut self, anchor: Anchor) {
        self.ctx.canvas.begin_drag(anchor);
    }

    pub fn canvas_drag_move(&mut self, pointer: Pos2) {
        self.ctx.canvas.drag_move(pointer);
    }

    /// Finish a resize drag: apply it to the surface and record the single
    /// resize command
    pub async fn end_canvas_drag(&mut self, pointer: Pos2) {
        let line_width = self.tool.line_width();
        let Some(command) = self.ctx.canvas.end_drag(pointer, line_width, &self.ctx.colors) else {
            return;
        };
        self.commit(command).await;
    }

    pub async fn undo(&mut self) {
        self.history.undo(&mut self.ctx).await;
    }

    pub fn redo(&mut self) {
        self.history.redo(&mut self.ctx);
    }

    /// Let time pass; runs deferred replays that became due
    pub async fn tick(&mut self, elapsed: Duration) -> usize {
        self.history.advance(&mut self.ctx, elapsed).await
    }

    pub fn history(&self) -> &UndoRedoEngine {
        &self.history
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    pub fn colors_mut(&mut self) -> &mut ColorContext {
        &mut self.ctx.colors
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}
