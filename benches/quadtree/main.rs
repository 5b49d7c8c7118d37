use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use quadsim::initial_conditions::gen_position;
use quadsim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn get_simulation(num_particles: usize) -> Simulation {
    let region = Region::from_size(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(0);
    let particles: Vec<_> = (0..num_particles)
        .map(|i| {
            Particle::new(
                ParticleId(i),
                gen_position(&mut rng, &region),
                MVec::ZERO,
                10.0,
            )
        })
        .collect();
    Simulation::new(
        particles.into(),
        SimulationBox::new(region, Boundary::Open),
        QuadTreeConfig::default(),
        1.0 / 60.0,
    )
}

fn rebuild_and_traverse(simulation: &Simulation) -> usize {
    let tree = simulation.rebuild_in_box();
    let mut num_nodes = 0;
    Simulation::traverse(tree.as_ref(), |_, _| num_nodes += 1);
    num_nodes
}

pub fn quadtree_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    group
        .sample_size(100)
        .measurement_time(Duration::from_secs(5));
    for num_particles in [20, 100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_particles),
            &get_simulation(num_particles),
            |b, simulation| b.iter(|| rebuild_and_traverse(simulation)),
        );
    }
    group.finish();
}

criterion_group!(benches, quadtree_benchmark);
criterion_main!(benches);
