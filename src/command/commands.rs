use egui::Pos2;
use log::{debug, error, warn};
use uuid::Uuid;

use super::CommandContext;
use crate::canvas::CanvasDimensions;
use crate::persistence::StoredCanvas;
use crate::state::{
    AerosolState, DrawingState, ResizeState, ShapeState, StatePayload, TextState, ToolState, TracerState,
};
use crate::surface::{ShapePaint, StyleScope};

/// Identity of one command, stable across undo/redo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(Uuid);

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a command's replay fits into a full history replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// Finishes before `execute` returns
    Immediate,
    /// Waits on image capture; must be awaited before the next command draws
    Awaited,
}

/// One completed, replayable drawing or canvas operation
#[derive(Debug)]
pub struct Command {
    id: CommandId,
    state: ToolState,
}

impl Command {
    pub fn new(state: ToolState) -> Self {
        Self {
            id: CommandId(Uuid::new_v4()),
            state,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn name(&self) -> &'static str {
        self.state.payload().name()
    }

    pub fn resize_state(&self) -> Option<&ResizeState> {
        match self.state.payload() {
            StatePayload::Resize(resize) => Some(resize),
            _ => None,
        }
    }

    pub fn replay_mode(&self) -> ReplayMode {
        match self.state.payload() {
            StatePayload::Resize(_) => ReplayMode::Awaited,
            StatePayload::Shape(_)
            | StatePayload::Tracer(_)
            | StatePayload::Aerosol(_)
            | StatePayload::Drawing(_)
            | StatePayload::Text(_) => ReplayMode::Immediate,
        }
    }

    /// Redraw this command's effect from its snapshot
    pub async fn execute(&self, ctx: &mut CommandContext) {
        match self.state.payload() {
            StatePayload::Resize(resize) => replay_resize(resize, ctx).await,
            _ => self.execute_now(ctx),
        }
    }

    /// Synchronous replay for [`ReplayMode::Immediate`] commands. A command
    /// that has to be awaited draws nothing here.
    pub fn execute_now(&self, ctx: &mut CommandContext) {
        let state = &self.state;
        match state.payload() {
            StatePayload::Shape(shape) => draw_shape(state, shape, ctx),
            StatePayload::Tracer(tracer) => draw_trace(state, tracer, ctx),
            StatePayload::Aerosol(aerosol) => draw_aerosol(state, aerosol, ctx),
            StatePayload::Drawing(drawing) => draw_image(drawing, ctx),
            StatePayload::Text(text) => draw_text(state, text, ctx),
            StatePayload::Resize(_) => {
                warn!("{} command {} must be awaited, skipped", self.name(), self.id)
            }
        }
    }

    /// Put the canvas back to its size before this command. Only resize
    /// commands have anything to restore.
    pub fn restore_state(&self, ctx: &mut CommandContext) {
        match self.state.payload() {
            StatePayload::Resize(resize) => apply_dimensions(resize.before(), ctx),
            StatePayload::Shape(_)
            | StatePayload::Tracer(_)
            | StatePayload::Aerosol(_)
            | StatePayload::Drawing(_)
            | StatePayload::Text(_) => {}
        }
    }

    /// Make this command's resulting canvas size the target before a replay
    pub fn assign_state(&self, ctx: &mut CommandContext) {
        match self.state.payload() {
            StatePayload::Resize(resize) => apply_dimensions(resize.after(), ctx),
            StatePayload::Shape(_)
            | StatePayload::Tracer(_)
            | StatePayload::Aerosol(_)
            | StatePayload::Drawing(_)
            | StatePayload::Text(_) => {}
        }
    }

    /// Persist the current surface raster. Failures are logged, not returned.
    pub fn save_canvas(&self, ctx: &mut CommandContext) {
        let region = ctx.surface.dimensions().rect();
        let Some(raster) = ctx.surface.export(region) else {
            warn!("Command {} has no raster to persist", self.id);
            return;
        };
        let result = StoredCanvas::encode(&raster).and_then(|stored| ctx.store.save(&ctx.storage_key, stored));
        match result {
            Ok(()) => debug!(
                "Command {} persisted {}x{} canvas under '{}'",
                self.id,
                raster.width(),
                raster.height(),
                ctx.storage_key
            ),
            Err(err) => error!("Failed to persist canvas: {}", err),
        }
    }
}

fn draw_shape(state: &ToolState, shape: &ShapeState, ctx: &mut CommandContext) {
    let mut surface = StyleScope::new(&mut *ctx.surface);
    surface.set_line_width(state.line_width());
    let kind = shape.active_shape();

    if shape.filled {
        // A bordered shape is filled with the secondary color
        let fill = if shape.bordered { state.secondary() } else { state.primary() };
        surface.set_fill_style(fill);
        surface.draw_shape(kind, shape.start, shape.end, ShapePaint::Fill);
    }
    if shape.bordered {
        surface.set_stroke_style(state.primary());
        surface.draw_shape(kind, shape.start, shape.end, ShapePaint::Border);
    }
}

fn draw_trace(state: &ToolState, tracer: &TracerState, ctx: &mut CommandContext) {
    let mut surface = StyleScope::new(&mut *ctx.surface);
    if tracer.points.is_empty() {
        return;
    }
    surface.set_line_width(state.line_width());
    surface.set_stroke_style(state.primary());
    surface.stroke_path(&tracer.points);
}

fn draw_aerosol(state: &ToolState, aerosol: &AerosolState, ctx: &mut CommandContext) {
    let mut surface = StyleScope::new(&mut *ctx.surface);
    surface.set_fill_style(state.primary());
    for dot in aerosol.emissions.iter().flatten() {
        surface.fill_dot(*dot, aerosol.dot_size);
    }
}

fn draw_image(drawing: &DrawingState, ctx: &mut CommandContext) {
    if drawing.replace {
        let region = ctx.surface.dimensions().rect();
        ctx.surface.clear(region);
    }
    ctx.surface.draw_image(&drawing.image, Pos2::ZERO);
}

fn draw_text(state: &ToolState, text: &TextState, ctx: &mut CommandContext) {
    let mut surface = StyleScope::new(&mut *ctx.surface);
    if text.text.is_empty() {
        return;
    }
    surface.set_fill_style(state.primary());
    surface.fill_text(&text.text, text.anchor, &text.font);
}

fn apply_dimensions(dimensions: CanvasDimensions, ctx: &mut CommandContext) {
    ctx.canvas.update_canvas_dimensions(dimensions.width, dimensions.height);
    let committed = ctx.canvas.dimensions();
    ctx.surface.resize(committed);
}

/// Capture what survives the resize, resize the surface (which clears it)
/// and draw the capture back at the origin
async fn replay_resize(resize: &ResizeState, ctx: &mut CommandContext) {
    let region = resize.before().overlap(resize.after()).rect();
    let capture = ctx.images.capture(&*ctx.surface, region);
    let image = capture.await;

    apply_dimensions(resize.after(), ctx);
    match image {
        Some(image) => ctx.surface.draw_image(&image, Pos2::ZERO),
        None => warn!(
            "Resize to {}x{} redrew nothing, capture failed",
            resize.after().width,
            resize.after().height
        ),
    }
}
