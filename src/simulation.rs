// src/simulation.rs - clock, run status, and per-tick orchestration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::processor::{ProcessorError, ProcessorId, ProcessorPool};
use crate::queue::{QueueError, QueueId, QueueNetwork};
use crate::task::TaskRegistry;

/// Queue parameters used by `start_simulation`; not caller-configurable.
pub const DEFAULT_QUEUE_INTERVAL: i64 = 1;
pub const DEFAULT_QUEUE_LENGTH_LIMIT: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMode {
    /// Queue i feeds processor i; counts must match.
    OneToOne,
    /// Every queue feeds every processor.
    OneToMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    Stopped,
    Running,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("{label} must be a positive integer, got {value}")]
    InvalidCount { label: &'static str, value: i64 },
    #[error("queue and processor counts must match for one-to-one connections, got {queues} and {processors}")]
    CountMismatch { queues: i64, processors: i64 },
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// One simulation run. Owns its registry, pool, and network outright, so
/// independent simulations never share state.
#[derive(Debug)]
pub struct Simulation {
    tasks: TaskRegistry,
    processors: ProcessorPool,
    queues: QueueNetwork,
    current_time: i64,
    status: SimulationStatus,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            tasks: TaskRegistry::new(),
            processors: ProcessorPool::new(),
            queues: QueueNetwork::new(),
            current_time: 0,
            status: SimulationStatus::Stopped,
        }
    }

    /// Reset all stores and build a fresh topology: `queue_count` queues
    /// with the default interval and length limit, `processor_count`
    /// processors, wired per `mode`. Validation failures leave existing
    /// state untouched.
    pub fn start_simulation(
        &mut self,
        queue_count: i64,
        processor_count: i64,
        mode: ConnectionMode,
    ) -> Result<(), SimulationError> {
        if queue_count <= 0 {
            return Err(SimulationError::InvalidCount {
                label: "queue count",
                value: queue_count,
            });
        }
        if processor_count <= 0 {
            return Err(SimulationError::InvalidCount {
                label: "processor count",
                value: processor_count,
            });
        }
        if mode == ConnectionMode::OneToOne && queue_count != processor_count {
            return Err(SimulationError::CountMismatch {
                queues: queue_count,
                processors: processor_count,
            });
        }

        // Registry first so no live-task reference survives the wipe.
        self.tasks.reset();
        self.queues.reset();
        self.processors.reset();
        self.current_time = 0;

        let mut queue_ids = Vec::with_capacity(queue_count as usize);
        for _ in 0..queue_count {
            queue_ids.push(
                self.queues
                    .create_queue(DEFAULT_QUEUE_INTERVAL, DEFAULT_QUEUE_LENGTH_LIMIT)?,
            );
        }

        let mut processor_ids = Vec::with_capacity(processor_count as usize);
        for _ in 0..processor_count {
            processor_ids.push(self.processors.create_processor());
        }

        match mode {
            ConnectionMode::OneToOne => {
                for (queue_id, processor_id) in queue_ids.iter().zip(&processor_ids) {
                    self.queues.connect_to_processor(*queue_id, *processor_id)?;
                }
            }
            ConnectionMode::OneToMany => {
                for queue_id in &queue_ids {
                    for processor_id in &processor_ids {
                        self.queues.connect_to_processor(*queue_id, *processor_id)?;
                    }
                }
            }
        }

        self.status = SimulationStatus::Running;
        tracing::info!(
            queues = queue_count,
            processors = processor_count,
            ?mode,
            "simulation started"
        );
        Ok(())
    }

    /// Halt the run. Idempotent.
    pub fn stop_simulation(&mut self) {
        if self.status == SimulationStatus::Running {
            tracing::info!(tick = self.current_time, "simulation stopped");
        }
        self.status = SimulationStatus::Stopped;
    }

    /// Advance one tick: release finished processors, then produce and
    /// dispatch. Any queue overflow halts the run without advancing the
    /// clock. A no-op unless running with at least one queue and one
    /// processor.
    pub fn step_simulation(&mut self) -> Result<(), SimulationError> {
        if self.status != SimulationStatus::Running
            || self.queues.is_empty()
            || self.processors.is_empty()
        {
            return Ok(());
        }

        self.processors.step_time(self.current_time, &mut self.tasks);
        let failed = self
            .queues
            .step_time(self.current_time, &mut self.processors, &mut self.tasks)?;

        if !failed.is_empty() {
            tracing::info!(
                tick = self.current_time,
                failed_queues = ?failed,
                "halting after queue overflow"
            );
            self.status = SimulationStatus::Stopped;
            return Ok(());
        }

        self.current_time += 1;
        Ok(())
    }

    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SimulationStatus::Running
    }

    pub fn task_registry(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn processor_pool(&self) -> &ProcessorPool {
        &self.processors
    }

    pub fn queue_network(&self) -> &QueueNetwork {
        &self.queues
    }

    pub fn queue_network_mut(&mut self) -> &mut QueueNetwork {
        &mut self.queues
    }

    /// Plain-data view of the current tick for trace output and UIs.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            tick: self.current_time,
            status: self.status,
            queues: self
                .queues
                .queues()
                .iter()
                .map(|queue| QueueSnapshot {
                    id: queue.id,
                    depth: queue.tasks.len(),
                    failed: queue.failed,
                })
                .collect(),
            processors: self
                .processors
                .processors()
                .iter()
                .map(|processor| ProcessorSnapshot {
                    id: processor.id,
                    busy: !processor.is_ready(),
                })
                .collect(),
            pool_size: self.tasks.pool_len(),
        }
    }

    /// Ids of queues that have latched failed.
    pub fn failed_queues(&self) -> Vec<QueueId> {
        self.queues
            .queues()
            .iter()
            .filter(|queue| queue.failed)
            .map(|queue| queue.id)
            .collect()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickSnapshot {
    pub tick: i64,
    pub status: SimulationStatus,
    pub queues: Vec<QueueSnapshot>,
    pub processors: Vec<ProcessorSnapshot>,
    pub pool_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub id: QueueId,
    pub depth: usize,
    pub failed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessorSnapshot {
    pub id: ProcessorId,
    pub busy: bool,
}
