// src/queue.rs - bounded FIFO queues: interval production and dispatch

use std::collections::VecDeque;

use thiserror::Error;

use crate::processor::{ProcessorError, ProcessorId, ProcessorPool};
use crate::task::{Task, TaskRegistry};

pub type QueueId = u32;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue {0} not found")]
    NotFound(QueueId),
    #[error("{label} must be a positive integer, got {value}")]
    InvalidParameter { label: &'static str, value: i64 },
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// A bounded FIFO queue that produces one task every `interval` ticks and
/// dispatches to its connected processors.
///
/// `connected` holds processor ids only; the processors themselves live in
/// the `ProcessorPool` and are looked up at dispatch time.
#[derive(Debug)]
pub struct Queue {
    pub id: QueueId,
    pub interval: i64,
    pub length_limit: i64,
    pub tasks: VecDeque<Task>,
    pub connected: Vec<ProcessorId>,
    pub last_produced_at: i64,
    /// Latched when the backlog exceeds `length_limit`; a failed queue
    /// never produces or dispatches again.
    pub failed: bool,
}

/// Owns every queue; stepping visits queues in creation order.
#[derive(Debug)]
pub struct QueueNetwork {
    queues: Vec<Queue>,
    next_id: QueueId,
}

impl QueueNetwork {
    pub fn new() -> Self {
        Self {
            queues: Vec::new(),
            next_id: 1,
        }
    }

    pub fn create_queue(&mut self, interval: i64, length_limit: i64) -> Result<QueueId, QueueError> {
        if interval <= 0 {
            return Err(QueueError::InvalidParameter {
                label: "interval",
                value: interval,
            });
        }
        if length_limit <= 0 {
            return Err(QueueError::InvalidParameter {
                label: "length limit",
                value: length_limit,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.queues.push(Queue {
            id,
            interval,
            length_limit,
            tasks: VecDeque::new(),
            connected: Vec::new(),
            // Production is eligible at tick 0.
            last_produced_at: -interval,
            failed: false,
        });
        Ok(id)
    }

    /// Connect a processor to a queue. Connecting the same processor twice
    /// is a no-op.
    pub fn connect_to_processor(
        &mut self,
        queue_id: QueueId,
        processor_id: ProcessorId,
    ) -> Result<(), QueueError> {
        let queue = self.find_queue_mut(queue_id)?;
        if !queue.connected.contains(&processor_id) {
            queue.connected.push(processor_id);
        }
        Ok(())
    }

    pub fn find_queue(&self, id: QueueId) -> Result<&Queue, QueueError> {
        self.queues
            .iter()
            .find(|queue| queue.id == id)
            .ok_or(QueueError::NotFound(id))
    }

    pub fn find_queue_mut(&mut self, id: QueueId) -> Result<&mut Queue, QueueError> {
        self.queues
            .iter_mut()
            .find(|queue| queue.id == id)
            .ok_or(QueueError::NotFound(id))
    }

    /// Advance every queue by one tick: produce when the interval elapses,
    /// then dispatch queued tasks to ready processors in connection order.
    ///
    /// A queue that overflows its limit is latched failed, skipped for the
    /// rest of the call (including dispatch of its existing backlog), and
    /// reported in the returned list. Each processor receives at most one
    /// task per call.
    pub fn step_time(
        &mut self,
        current_time: i64,
        pool: &mut ProcessorPool,
        registry: &mut TaskRegistry,
    ) -> Result<Vec<QueueId>, QueueError> {
        let mut newly_failed = Vec::new();

        for queue in &mut self.queues {
            if queue.failed {
                continue;
            }

            if current_time - queue.last_produced_at >= queue.interval {
                queue.last_produced_at = current_time;
                let task = registry.new_task();
                queue.tasks.push_back(task);
                tracing::debug!(
                    queue = queue.id,
                    task = task.id,
                    tick = current_time,
                    backlog = queue.tasks.len(),
                    "task produced"
                );

                if queue.tasks.len() as i64 > queue.length_limit {
                    queue.failed = true;
                    newly_failed.push(queue.id);
                    tracing::warn!(
                        queue = queue.id,
                        tick = current_time,
                        limit = queue.length_limit,
                        "queue exceeded its length limit"
                    );
                    continue;
                }
            }

            if queue.tasks.is_empty() {
                continue;
            }

            for index in 0..queue.connected.len() {
                if queue.tasks.is_empty() {
                    break;
                }
                let processor_id = queue.connected[index];
                if !pool.check_ready(processor_id)? {
                    continue;
                }
                if let Some(task) = queue.tasks.pop_front() {
                    pool.accept_task(processor_id, task, current_time)?;
                    tracing::debug!(
                        queue = queue.id,
                        processor = processor_id,
                        task = task.id,
                        tick = current_time,
                        "task dispatched"
                    );
                }
            }
        }

        Ok(newly_failed)
    }

    pub fn queues(&self) -> &[Queue] {
        &self.queues
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn reset(&mut self) {
        self.queues.clear();
        self.next_id = 1;
    }
}

impl Default for QueueNetwork {
    fn default() -> Self {
        Self::new()
    }
}
