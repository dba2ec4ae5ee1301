// src/processor.rs - single-slot execution units and the pool that owns them

use thiserror::Error;

use crate::task::{Task, TaskRegistry};

pub type ProcessorId = u32;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("processor {0} not found")]
    NotFound(ProcessorId),
    #[error("processor {0} is busy")]
    Busy(ProcessorId),
}

/// An execution unit that holds at most one task at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Processor {
    pub id: ProcessorId,
    pub current_task: Option<Task>,
    /// Tick at which the current task completes. Meaningful only while
    /// `current_task` is set.
    pub busy_until: i64,
}

impl Processor {
    pub fn is_ready(&self) -> bool {
        self.current_task.is_none()
    }
}

/// Owns every processor; iteration order is creation order.
#[derive(Debug)]
pub struct ProcessorPool {
    processors: Vec<Processor>,
    next_id: ProcessorId,
}

impl ProcessorPool {
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
            next_id: 1,
        }
    }

    pub fn create_processor(&mut self) -> ProcessorId {
        let id = self.next_id;
        self.next_id += 1;
        self.processors.push(Processor {
            id,
            current_task: None,
            busy_until: 0,
        });
        id
    }

    pub fn find_processor(&self, id: ProcessorId) -> Result<&Processor, ProcessorError> {
        self.processors
            .iter()
            .find(|processor| processor.id == id)
            .ok_or(ProcessorError::NotFound(id))
    }

    fn find_processor_mut(&mut self, id: ProcessorId) -> Result<&mut Processor, ProcessorError> {
        self.processors
            .iter_mut()
            .find(|processor| processor.id == id)
            .ok_or(ProcessorError::NotFound(id))
    }

    /// Ready means the processor holds no task.
    pub fn check_ready(&self, id: ProcessorId) -> Result<bool, ProcessorError> {
        Ok(self.find_processor(id)?.is_ready())
    }

    /// Hand a task to an idle processor; it stays busy until
    /// `current_time + task.duration`.
    pub fn accept_task(
        &mut self,
        id: ProcessorId,
        task: Task,
        current_time: i64,
    ) -> Result<(), ProcessorError> {
        let processor = self.find_processor_mut(id)?;
        if processor.current_task.is_some() {
            return Err(ProcessorError::Busy(id));
        }
        processor.current_task = Some(task);
        processor.busy_until = current_time + task.duration;
        Ok(())
    }

    /// Release every task whose deadline has passed, returning each one to
    /// the registry. Processors are visited in creation order.
    pub fn step_time(&mut self, current_time: i64, registry: &mut TaskRegistry) {
        for processor in &mut self.processors {
            if let Some(task) = processor.current_task {
                if current_time >= processor.busy_until {
                    tracing::debug!(
                        processor = processor.id,
                        task = task.id,
                        tick = current_time,
                        "task finished"
                    );
                    registry.return_task(task);
                    processor.current_task = None;
                }
            }
        }
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn reset(&mut self) {
        self.processors.clear();
        self.next_id = 1;
    }
}

impl Default for ProcessorPool {
    fn default() -> Self {
        Self::new()
    }
}
