mod common;

use common::{baseline, harness};
use egui::Pos2;
use futures::executor::block_on;
use image::Rgba;
use paint_history::surface::SurfaceOp;
use paint_history::{Anchor, CanvasDimensions, CommandContext, DrawingSurface, UndoRedoEngine};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CLEARED: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn pixel(ctx: &CommandContext, x: u32, y: u32) -> Rgba<u8> {
    let raster = ctx
        .surface
        .export(ctx.surface.dimensions().rect())
        .expect("surface has pixels");
    *raster.get_pixel(x, y)
}

fn drag(ctx: &mut CommandContext, anchor: Anchor, to: Pos2) -> paint_history::Command {
    ctx.canvas.begin_drag(anchor);
    ctx.canvas.drag_move(to);
    ctx.canvas.end_drag(to, 1.0, &ctx.colors).expect("drag in progress")
}

#[test]
fn test_anchors_follow_committed_size() {
    let h = harness();
    let anchors = h.ctx.canvas.anchors();
    assert_eq!(anchors.get(Anchor::TopLeft), Pos2::new(0.0, 0.0));
    assert_eq!(anchors.get(Anchor::BottomRight), Pos2::new(500.0, 500.0));
    assert_eq!(anchors.get(Anchor::BottomMiddle), Pos2::new(250.0, 500.0));
    assert_eq!(anchors.get(Anchor::MiddleRight), Pos2::new(500.0, 250.0));
}

#[test]
fn test_undersized_request_is_clamped_per_axis() {
    let mut h = harness();
    h.ctx.canvas.update_canvas_dimensions(200, 0);
    assert_eq!(h.ctx.canvas.dimensions(), CanvasDimensions::new(250, 250));
    assert_eq!(h.ctx.canvas.preview_dimensions().width, 250);
    assert_eq!(h.ctx.canvas.anchor(Anchor::BottomRight), Pos2::new(250.0, 250.0));
}

#[test]
fn test_one_drag_emits_one_command_even_without_change() {
    let mut h = harness();
    h.ctx.canvas.begin_drag(Anchor::BottomRight);
    for step in 0..10 {
        h.ctx.canvas.drag_move(Pos2::new(500.0 + step as f32, 500.0));
    }
    let command = h
        .ctx
        .canvas
        .end_drag(Pos2::new(500.0, 500.0), 1.0, &h.ctx.colors)
        .expect("resize command");

    let resize = command.resize_state().expect("resize payload");
    assert_eq!(resize.before(), resize.after());
    assert!(h.ctx.canvas.end_drag(Pos2::new(600.0, 600.0), 1.0, &h.ctx.colors).is_none());
}

#[test]
fn test_growing_keeps_content_at_origin() {
    let mut h = harness();
    block_on(baseline(&h.ctx).execute(&mut h.ctx));
    let resize = drag(&mut h.ctx, Anchor::BottomRight, Pos2::new(700.0, 600.0));

    block_on(resize.execute(&mut h.ctx));

    assert_eq!(h.ctx.surface.dimensions(), CanvasDimensions::new(700, 600));
    assert_eq!(pixel(&h.ctx, 10, 10), WHITE);
    assert_eq!(pixel(&h.ctx, 499, 499), WHITE);
    assert_eq!(pixel(&h.ctx, 650, 10), CLEARED);
    assert_eq!(pixel(&h.ctx, 10, 550), CLEARED);
}

#[test]
fn test_shrinking_crops_to_overlap() {
    let mut h = harness();
    block_on(baseline(&h.ctx).execute(&mut h.ctx));
    let resize = drag(&mut h.ctx, Anchor::MiddleRight, Pos2::new(300.0, 250.0));
    h.journal.clear();

    block_on(resize.execute(&mut h.ctx));

    assert_eq!(h.ctx.surface.dimensions(), CanvasDimensions::new(300, 500));
    assert_eq!(pixel(&h.ctx, 299, 499), WHITE);
    let ops = h.journal.ops();
    assert_eq!(ops[0], SurfaceOp::Resize(CanvasDimensions::new(300, 500)));
    assert!(matches!(ops[1], SurfaceOp::DrawImage { at, .. } if at == Pos2::ZERO));
}

#[test]
fn test_drag_below_minimum_commits_minimum() {
    let mut h = harness();
    let resize = drag(&mut h.ctx, Anchor::BottomMiddle, Pos2::new(250.0, 40.0));

    let state = resize.resize_state().expect("resize payload");
    assert_eq!(state.after(), CanvasDimensions::new(500, 250));
    assert_eq!(h.ctx.canvas.anchor(Anchor::BottomMiddle), Pos2::new(250.0, 250.0));
}

#[test]
fn test_undo_redo_of_resize_round_trips_pixels() {
    let mut h = harness();
    let mut engine = UndoRedoEngine::default();
    let first = baseline(&h.ctx);
    block_on(first.execute(&mut h.ctx));
    engine.add_command(first);
    engine.set_min_history_size(1);
    let resize = drag(&mut h.ctx, Anchor::MiddleRight, Pos2::new(640.0, 250.0));
    block_on(resize.execute(&mut h.ctx));
    engine.add_command(resize);

    block_on(engine.undo(&mut h.ctx));
    let delay = engine.resize_replay_delay();
    block_on(engine.advance(&mut h.ctx, delay));
    assert_eq!(h.ctx.surface.dimensions(), CanvasDimensions::new(500, 500));
    assert_eq!(pixel(&h.ctx, 499, 10), WHITE);

    engine.redo(&mut h.ctx);
    block_on(engine.run_pending(&mut h.ctx));
    assert_eq!(h.ctx.surface.dimensions(), CanvasDimensions::new(640, 500));
    assert_eq!(pixel(&h.ctx, 499, 10), WHITE);
    assert_eq!(pixel(&h.ctx, 600, 10), CLEARED);
    assert!(!engine.can_redo());
}
