use egui::Pos2;

use crate::color::ColorContext;
use crate::command::Command;

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool is selected (activated).
    /// Can be used to initialize or reset tool state.
    fn activate(&mut self) {
        // default: do nothing
    }

    /// Called when the tool is deselected. Drops any unfinished interaction.
    fn deactivate(&mut self);

    fn line_width(&self) -> f32;

    fn set_line_width(&mut self, width: f32);

    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down
    fn on_pointer_move(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command>;

    /// Handle pointer release. Returns the finished command, snapshotting
    /// the tool's state and the current colors.
    fn on_pointer_up(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command>;
}

// Tool implementations
mod shape_tool;
mod text_tool;
mod tracer_tool;

pub use shape_tool::ShapeTool;
pub use text_tool::TextTool;
pub use tracer_tool::TracerTool;

/// Enum representing all available tool types
#[derive(Debug, Clone)]
pub enum ToolType {
    Tracer(TracerTool),
    Shape(ShapeTool),
    Text(TextTool),
}

impl Default for ToolType {
    fn default() -> Self {
        Self::Tracer(TracerTool::pencil(1.0))
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Tracer(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
            Self::Text(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Tracer(tool) => tool.activate(),
            Self::Shape(tool) => tool.activate(),
            Self::Text(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) {
        match self {
            Self::Tracer(tool) => tool.deactivate(),
            Self::Shape(tool) => tool.deactivate(),
            Self::Text(tool) => tool.deactivate(),
        }
    }

    fn line_width(&self) -> f32 {
        match self {
            Self::Tracer(tool) => tool.line_width(),
            Self::Shape(tool) => tool.line_width(),
            Self::Text(tool) => tool.line_width(),
        }
    }

    fn set_line_width(&mut self, width: f32) {
        match self {
            Self::Tracer(tool) => tool.set_line_width(width),
            Self::Shape(tool) => tool.set_line_width(width),
            Self::Text(tool) => tool.set_line_width(width),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command> {
        match self {
            Self::Tracer(tool) => tool.on_pointer_down(pos, colors),
            Self::Shape(tool) => tool.on_pointer_down(pos, colors),
            Self::Text(tool) => tool.on_pointer_down(pos, colors),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command> {
        match self {
            Self::Tracer(tool) => tool.on_pointer_move(pos, colors),
            Self::Shape(tool) => tool.on_pointer_move(pos, colors),
            Self::Text(tool) => tool.on_pointer_move(pos, colors),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, colors: &ColorContext) -> Option<Command> {
        match self {
            Self::Tracer(tool) => tool.on_pointer_up(pos, colors),
            Self::Shape(tool) => tool.on_pointer_up(pos, colors),
            Self::Text(tool) => tool.on_pointer_up(pos, colors),
        }
    }
}
