// End-to-end runs through the public API.

use quesim::simulation::{ConnectionMode, Simulation, SimulationStatus};

#[test]
fn one_to_one_topology_runs_in_steady_state() {
    let mut sim = Simulation::new();
    sim.start_simulation(2, 2, ConnectionMode::OneToOne).unwrap();

    for _ in 0..50 {
        sim.step_simulation().unwrap();
    }

    // Default interval 1 and duration 1: every produced task is dispatched
    // the tick it appears and released the next, so nothing accumulates.
    assert_eq!(sim.status(), SimulationStatus::Running);
    assert_eq!(sim.current_time(), 50);
    for queue in sim.queue_network().queues() {
        assert!(queue.tasks.is_empty());
        assert!(!queue.failed);
    }
    // Retired records are recycled the tick after release.
    assert_eq!(sim.task_registry().pool_len(), 0);
}

#[test]
fn undersized_pool_overflows_the_starved_queue() {
    let mut sim = Simulation::new();
    sim.start_simulation(2, 1, ConnectionMode::OneToMany).unwrap();

    let mut guard = 0;
    while sim.is_running() {
        sim.step_simulation().unwrap();
        guard += 1;
        assert!(guard < 100, "simulation should have halted");
    }

    // Queue 1 always wins the lone processor, so queue 2's backlog grows
    // by one per tick: depths 1, 2, 3, then 4 > 3 on tick 3.
    assert_eq!(sim.current_time(), 3);
    assert_eq!(sim.failed_queues(), vec![2]);
    assert_eq!(sim.status(), SimulationStatus::Stopped);
}

#[test]
fn restarting_rebuilds_everything_from_scratch() {
    let mut sim = Simulation::new();
    sim.start_simulation(3, 3, ConnectionMode::OneToOne).unwrap();
    for _ in 0..10 {
        sim.step_simulation().unwrap();
    }

    sim.start_simulation(2, 2, ConnectionMode::OneToOne).unwrap();

    assert_eq!(sim.current_time(), 0);
    assert_eq!(sim.queue_network().len(), 2);
    assert_eq!(sim.processor_pool().len(), 2);
    let queue_ids: Vec<_> = sim.queue_network().queues().iter().map(|q| q.id).collect();
    assert_eq!(queue_ids, vec![1, 2]);
    assert_eq!(sim.task_registry().pool_len(), 0);

    // Task ids restart too: the first production tick allocates 1 and 2.
    sim.step_simulation().unwrap();
    let first_task = sim.processor_pool().processors()[0]
        .current_task
        .expect("dispatch on tick 0");
    assert_eq!(first_task.id, 1);
}

#[test]
fn snapshots_serialize_for_trace_output() {
    let mut sim = Simulation::new();
    sim.start_simulation(1, 1, ConnectionMode::OneToOne).unwrap();
    sim.step_simulation().unwrap();

    let json = serde_json::to_string(&sim.snapshot()).unwrap();
    assert!(json.contains("\"tick\":1"));
    assert!(json.contains("\"status\":\"running\""));
}
