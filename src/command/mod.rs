mod commands;
mod context;
mod history;

pub use commands::{Command, CommandId, ReplayMode};
pub use context::CommandContext;
pub use history::{DeferredReplay, ReplayReport, UndoRedoEngine};
