use egui::Pos2;

use crate::color::ColorContext;
use crate::command::Command;
use crate::state::{StatePayload, ToolState, TraceMode, TracerState};
use crate::tools::Tool;

/// Pencil and line tools
#[derive(Debug, Clone)]
pub struct TracerTool {
    mode: TraceMode,
    line_width: f32,
    // Transient state: the path being traced (if any)
    points: Option<Vec<Pos2>>,
}

impl TracerTool {
    pub fn new(mode: TraceMode, line_width: f32) -> Self {
        Self {
            mode,
            line_width,
            points: None,
        }
    }

    pub fn pencil(line_width: f32) -> Self {
        Self::new(TraceMode::Freehand, line_width)
    }

    pub fn line(line_width: f32) -> Self {
        Self::new(TraceMode::Line, line_width)
    }

    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    /// Points traced so far, for previews
    pub fn preview(&self) -> &[Pos2] {
        self.points.as_deref().unwrap_or(&[])
    }

    fn extend(&mut self, pos: Pos2) {
        let Some(points) = &mut self.points else {
            return;
        };
        match self.mode {
            TraceMode::Freehand => points.push(pos),
            TraceMode::Line => {
                points.truncate(1);
                points.push(pos);
            }
        }
    }
}

impl Tool for TracerTool {
    fn name(&self) -> &'static str {
        match self.mode {
            TraceMode::Freehand => "Pencil",
            TraceMode::Line => "Line",
        }
    }

    fn deactivate(&mut self) {
        self.points = None;
    }

    fn line_width(&self) -> f32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn on_pointer_down(&mut self, pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        self.points = Some(vec![pos]);
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _colors: &ColorContext) -> Option<Command> {
        self.extend(pos);
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command> {
        self.extend(pos);
        let points = self.points.take()?;
        let state = ToolState::capture(
            self.line_width,
            colors,
            StatePayload::Tracer(TracerState {
                mode: self.mode,
                points,
            }),
        );
        Some(Command::new(state))
    }
}
