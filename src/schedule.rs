use std::time::Duration;

/// Task waiting in a [`Scheduler`]
#[derive(Debug, Clone)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Virtual-clock task queue.
///
/// Nothing runs on its own: the owner advances the clock and receives the
/// tasks that became due, ordered by due time and then by insertion. A
/// zero delay means "next tick".
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) {
        let entry = Entry {
            due: self.now + delay,
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Move the clock forward and take every task due by the new time
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        self.now += by;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.queue).into_iter().partition(|entry| entry.due <= now);
        self.queue = waiting;

        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.task).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time left until the earliest task is due
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .iter()
            .map(|entry| entry.due.saturating_sub(self.now))
            .min()
    }
}
