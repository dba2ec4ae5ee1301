// quesim: tick-driven simulator for a closed queueing network.
//
// Work items are produced into bounded FIFO queues at fixed intervals and
// dispatched to single-capacity processors, one external tick at a time.
// Everything is synchronous; the caller drives the clock.

pub mod config;
pub mod processor;
pub mod queue;
pub mod simulation;
pub mod task;

pub use config::{ConfigError, RunConfig, SimulationConfig, load_config};
pub use processor::{Processor, ProcessorError, ProcessorId, ProcessorPool};
pub use queue::{Queue, QueueError, QueueId, QueueNetwork};
pub use simulation::{
    ConnectionMode, DEFAULT_QUEUE_INTERVAL, DEFAULT_QUEUE_LENGTH_LIMIT, Simulation,
    SimulationError, SimulationStatus, TickSnapshot,
};
pub use task::{Task, TaskId, TaskRegistry};
