// src/task.rs - task identity and the reuse pool behind it

use std::collections::VecDeque;

pub type TaskId = u32;

/// A unit of work produced by a queue and executed by a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Ticks of processor time this task occupies, always >= 1.
    pub duration: i64,
}

/// Sole producer of task identities, with a FIFO pool of retired records.
///
/// Ids are handed out exactly once and never repeat while a task is live.
/// Reuse recycles the physical record, not the identity: a recycled task
/// always comes back with a freshly allocated id.
#[derive(Debug)]
pub struct TaskRegistry {
    next_id: TaskId,
    pool: VecDeque<Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pool: VecDeque::new(),
        }
    }

    /// Allocate a task with the default duration of one tick.
    pub fn new_task(&mut self) -> Task {
        self.new_task_with_duration(1.0)
    }

    /// Allocate a task, recycling the oldest retired record if one exists.
    ///
    /// The duration is sanitized: non-finite values become 1, fractional
    /// values are floored, and the result is clamped to a minimum of 1.
    pub fn new_task_with_duration(&mut self, duration: f64) -> Task {
        let duration = sanitize_duration(duration);
        let id = self.next_id;
        self.next_id += 1;

        let mut task = self.pool.pop_front().unwrap_or(Task { id, duration });
        task.id = id;
        task.duration = duration;
        task
    }

    /// Retire a task. The caller must not treat it as live afterwards.
    pub fn return_task(&mut self, task: Task) {
        self.pool.push_back(task);
    }

    /// Number of retired records waiting for reuse.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Drop all retired records and restart the id sequence at 1.
    ///
    /// Only safe while no processor or queue holds a live task.
    pub fn reset(&mut self) {
        self.next_id = 1;
        self.pool.clear();
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_duration(value: f64) -> i64 {
    if !value.is_finite() {
        return 1;
    }
    let whole = value.floor();
    if whole < 1.0 { 1 } else { whole as i64 }
}
