#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod color;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod persistence;
pub mod raster;
pub mod schedule;
pub mod state;
pub mod surface;
pub mod tools;

pub use canvas::{Anchor, CanvasDimensions, CanvasOperations};
pub use color::{Color, ColorContext};
pub use command::{Command, CommandContext, CommandId, ReplayReport, UndoRedoEngine};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{ConfigError, PersistenceError};
pub use persistence::{CanvasStore, FileCanvasStore, MemoryCanvasStore};
pub use raster::{CanvasImage, ImageRef, ImageSource, SurfaceImageSource};
pub use state::{StatePayload, ToolState};
pub use surface::{DrawingSurface, MemorySurface, StyleScope};
pub use tools::{Tool, ToolType};
