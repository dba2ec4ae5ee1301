// Benchmark for tick stepping throughput
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use quesim::simulation::{ConnectionMode, Simulation};

fn bench_steady_state_stepping(c: &mut Criterion) {
    c.bench_function("step 10k ticks, 4x4 one-to-many", |b| {
        b.iter(|| {
            let mut sim = Simulation::new();
            sim.start_simulation(4, 4, ConnectionMode::OneToMany)
                .unwrap();
            for _ in 0..10_000 {
                sim.step_simulation().unwrap();
            }
            // Balanced topology never overflows.
            assert!(sim.is_running());
        });
    });
}

criterion_group!(benches, bench_steady_state_stepping);
criterion_main!(benches);
