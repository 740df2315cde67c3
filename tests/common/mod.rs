#![allow(dead_code)]

use std::task::Poll;

use egui::{Pos2, Rect};
use futures::future::LocalBoxFuture;
use paint_history::canvas::Anchor;
use paint_history::persistence::MemoryCanvasStore;
use paint_history::state::{DrawingState, StatePayload, ToolState, TraceMode, TracerState};
use paint_history::surface::SurfaceJournal;
use paint_history::{
    CanvasDimensions, CanvasImage, Command, CommandContext, DrawingSurface, EditorConfig, ImageRef, ImageSource,
    MemorySurface, SurfaceImageSource,
};

pub struct Harness {
    pub ctx: CommandContext,
    pub journal: SurfaceJournal,
    pub store: MemoryCanvasStore,
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config() -> EditorConfig {
    EditorConfig {
        initial_canvas: CanvasDimensions::new(500, 500),
        ..EditorConfig::default()
    }
}

pub fn harness() -> Harness {
    harness_with_images(Box::new(SurfaceImageSource))
}

pub fn harness_with_images(images: Box<dyn ImageSource>) -> Harness {
    init_logger();
    let surface = MemorySurface::new(CanvasDimensions::new(500, 500));
    let journal = surface.journal();
    let store = MemoryCanvasStore::new();
    let ctx = CommandContext::new(&config(), Box::new(surface), images, Box::new(store.clone()));
    Harness { ctx, journal, store }
}

/// Freehand command whose path starts at (`tag`, `tag`)
pub fn tracer(ctx: &CommandContext, tag: f32) -> Command {
    let state = ToolState::capture(
        2.0,
        &ctx.colors,
        StatePayload::Tracer(TracerState {
            mode: TraceMode::Freehand,
            points: vec![Pos2::new(tag, tag), Pos2::new(tag + 1.0, tag + 1.0)],
        }),
    );
    Command::new(state)
}

/// Blank baseline filling the current canvas
pub fn baseline(ctx: &CommandContext) -> Command {
    let image = CanvasImage::filled(ctx.canvas.dimensions(), image::Rgba([255, 255, 255, 255]));
    let state = ToolState::capture(1.0, &ctx.colors, StatePayload::Drawing(DrawingState { image, replace: true }));
    Command::new(state)
}

/// Resize the canvas width to `width` with a handle drag and return the command
pub fn resize_to_width(ctx: &mut CommandContext, width: f32) -> Command {
    let height = ctx.canvas.dimensions().height as f32;
    ctx.canvas.begin_drag(Anchor::MiddleRight);
    ctx.canvas.drag_move(Pos2::new(width, height / 2.0));
    ctx.canvas
        .end_drag(Pos2::new(width, height / 2.0), 1.0, &ctx.colors)
        .expect("drag in progress")
}

/// Capture source that needs a second poll before its image is ready, like
/// an image element that decodes asynchronously
pub struct DeferredImageSource;

impl ImageSource for DeferredImageSource {
    fn capture(&self, surface: &dyn DrawingSurface, region: Rect) -> LocalBoxFuture<'static, Option<ImageRef>> {
        let mut image = surface.export(region).map(CanvasImage::new_ref);
        let mut yielded = false;
        Box::pin(futures::future::poll_fn(move |cx| {
            if yielded {
                Poll::Ready(image.take())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }))
    }
}
