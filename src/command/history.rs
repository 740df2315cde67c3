use std::time::Duration;

use log::{debug, info};

use super::{Command, CommandContext, CommandId, ReplayMode};
use crate::config::DEFAULT_RESIZE_REPLAY_DELAY_MS;
use crate::schedule::Scheduler;

/// Why a full replay was deferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredReplay {
    /// Undo of a resize, waiting for the restored layout to settle
    ResizeUndo,
    /// Redo, run on the next tick
    Redo,
}

/// Outcome of a full history replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    pub replayed: usize,
    /// The command that persisted the surface afterwards
    pub persisted_by: Option<CommandId>,
}

/// Manages the history of executed commands for undo/redo.
///
/// Undo replays the whole remaining history instead of inverting commands:
/// every command assumes the cumulative effect of the ones before it.
pub struct UndoRedoEngine {
    /// Commands in execution order, oldest first
    command_history: Vec<Command>,
    /// Undone commands, most recently undone last
    redo_history: Vec<Command>,
    /// Undo never shrinks the history below this
    min_history_size: usize,
    resize_replay_delay: Duration,
    scheduler: Scheduler<DeferredReplay>,
}

impl std::fmt::Debug for UndoRedoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoRedoEngine")
            .field("command_history", &self.command_history.len())
            .field("redo_history", &self.redo_history.len())
            .field("min_history_size", &self.min_history_size)
            .field("pending_replays", &self.scheduler.pending())
            .finish()
    }
}

impl Default for UndoRedoEngine {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_RESIZE_REPLAY_DELAY_MS))
    }
}

impl UndoRedoEngine {
    pub fn new(resize_replay_delay: Duration) -> Self {
        Self {
            command_history: Vec::new(),
            redo_history: Vec::new(),
            min_history_size: 0,
            resize_replay_delay,
            scheduler: Scheduler::new(),
        }
    }

    /// Record a finished command. Anything undone so far can no longer be redone.
    pub fn add_command(&mut self, command: Command) {
        if !self.redo_history.is_empty() {
            debug!("Discarding {} redoable command(s)", self.redo_history.len());
            self.redo_history.clear();
        }
        debug!("Recorded {} command {}", command.name(), command.id());
        self.command_history.push(command);
    }

    /// Undo the last command and redraw what remains.
    ///
    /// A resize restores the old canvas size right away and replays after
    /// the configured delay; anything else replays immediately.
    pub async fn undo(&mut self, ctx: &mut CommandContext) {
        if self.command_history.len() <= self.min_history_size {
            debug!(
                "Undo ignored: {} command(s), floor is {}",
                self.command_history.len(),
                self.min_history_size
            );
            return;
        }
        let Some(command) = self.command_history.pop() else {
            return;
        };
        debug!("Undoing {} command {}", command.name(), command.id());

        match command.replay_mode() {
            ReplayMode::Awaited => {
                command.restore_state(ctx);
                self.redo_history.push(command);
                self.scheduler.schedule(self.resize_replay_delay, DeferredReplay::ResizeUndo);
            }
            ReplayMode::Immediate => {
                self.redo_history.push(command);
                self.execute_all(ctx).await;
            }
        }
    }

    /// Re-apply the most recently undone command. The replay itself runs on
    /// the next tick, after any resize target has been assigned.
    pub fn redo(&mut self, ctx: &mut CommandContext) {
        let Some(command) = self.redo_history.pop() else {
            debug!("Redo ignored: nothing to redo");
            return;
        };
        debug!("Redoing {} command {}", command.name(), command.id());

        if command.replay_mode() == ReplayMode::Awaited {
            command.assign_state(ctx);
        }
        self.command_history.push(command);
        self.scheduler.schedule(Duration::ZERO, DeferredReplay::Redo);
    }

    /// Forget everything, e.g. for a new canvas or a loaded image.
    /// Replays already scheduled still run, against whatever history exists then.
    pub fn clear_history(&mut self) {
        info!(
            "Clearing history ({} undoable, {} redoable)",
            self.command_history.len(),
            self.redo_history.len()
        );
        self.command_history.clear();
        self.redo_history.clear();
        self.min_history_size = 0;
    }

    /// Replay the whole history oldest first, awaiting commands that finish
    /// asynchronously, then persist the result once.
    pub async fn execute_all(&self, ctx: &mut CommandContext) -> ReplayReport {
        for command in &self.command_history {
            match command.replay_mode() {
                ReplayMode::Awaited => command.execute(ctx).await,
                ReplayMode::Immediate => command.execute_now(ctx),
            }
        }

        let persisted_by = self.command_history.first().map(|oldest| {
            oldest.save_canvas(ctx);
            oldest.id()
        });
        debug!("Replayed {} command(s)", self.command_history.len());
        ReplayReport {
            replayed: self.command_history.len(),
            persisted_by,
        }
    }

    /// Let `elapsed` pass and run every replay that became due. Returns the
    /// number of replays run.
    pub async fn advance(&mut self, ctx: &mut CommandContext, elapsed: Duration) -> usize {
        let due = self.scheduler.advance(elapsed);
        for replay in &due {
            debug!("Running deferred replay ({:?})", replay);
            self.execute_all(ctx).await;
        }
        due.len()
    }

    /// Run replays due on the next tick without moving the clock
    pub async fn run_pending(&mut self, ctx: &mut CommandContext) -> usize {
        self.advance(ctx, Duration::ZERO).await
    }

    pub fn pending_replays(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn next_replay_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    pub fn history(&self) -> &[Command] {
        &self.command_history
    }

    pub fn redo_history(&self) -> &[Command] {
        &self.redo_history
    }

    pub fn min_history_size(&self) -> usize {
        self.min_history_size
    }

    pub fn set_min_history_size(&mut self, size: usize) {
        self.min_history_size = size;
    }

    pub fn resize_replay_delay(&self) -> Duration {
        self.resize_replay_delay
    }

    /// Returns true if undo would do something
    pub fn can_undo(&self) -> bool {
        self.command_history.len() > self.min_history_size
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }
}
