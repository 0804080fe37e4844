//! Criterion benchmarks for u-timetable.
//!
//! Uses synthetic departments of growing size to measure chromosome
//! operators, ranking and full engine runs.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::ga::multi_objective::fitness_sort;
use u_timetable::ga::{Engine, NsgaII, RunConfig};
use u_timetable::models::{ClassSpec, Configuration, Course, Professor, StudentsGroup};
use u_timetable::random::create_rng;
use u_timetable::Schedule;

// ===========================================================================
// Synthetic department
// ===========================================================================

fn department(classes: usize) -> Arc<Configuration> {
    let professors = (classes / 4).max(1) as u32;
    let groups = (classes / 3).max(1) as u32;
    let rooms = (classes / 8).max(2);

    let mut config = Configuration::new();
    for id in 0..professors {
        config.add_professor(Professor::new(id, format!("P{id}")));
    }
    for id in 0..groups {
        config.add_group(StudentsGroup::new(id, format!("G{id}"), 15 + id % 20));
    }
    for r in 0..rooms {
        config.add_room(format!("R{r}"), r % 4 == 0, 25 + (r as u32 % 3) * 15);
    }
    for c in 0..classes {
        let course = c as u32;
        config.add_course(Course::new(course, format!("C{c}")));
        let spec = ClassSpec::new(course % professors, course)
            .with_group(course % groups)
            .with_duration(1 + c % 3)
            .with_lab(c % 5 == 0);
        config.add_class(spec).expect("valid class");
    }
    Arc::new(config)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_random_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_schedule");

    for &n in &[20, 100, 400] {
        let prototype = Schedule::new(department(n)).expect("valid configuration");
        group.bench_with_input(BenchmarkId::from_parameter(n), &prototype, |b, p| {
            let mut rng = create_rng(42);
            b.iter(|| black_box(p.make_new_from_prototype(&mut rng)))
        });
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover_mutation");

    for &n in &[20, 100, 400] {
        let prototype = Schedule::new(department(n)).expect("valid configuration");
        let mut rng = create_rng(42);
        let parents = (
            prototype.make_new_from_prototype(&mut rng),
            prototype.make_new_from_prototype(&mut rng),
        );
        group.bench_with_input(BenchmarkId::from_parameter(n), &parents, |b, (father, mother)| {
            b.iter(|| {
                let mut child = father.crossover(black_box(mother), 2, 100.0, &mut rng);
                child.mutation(2, 100.0, &mut rng);
                black_box(child)
            })
        });
    }
    group.finish();
}

fn bench_fitness_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness_sort");

    for &n in &[100, 200, 400] {
        let fitness: Vec<f64> = (0..n).map(|i| ((i * 7919) % 1000) as f64 / 1000.0).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &fitness, |b, f| {
            b.iter(|| black_box(fitness_sort(black_box(f))))
        });
    }
    group.finish();
}

fn bench_engine_nsga2(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_nsga2");
    group.sample_size(10);

    for &(n, pop, gen) in &[(20, 50, 50), (100, 100, 50)] {
        let prototype = Schedule::new(department(n)).expect("valid configuration");
        let config = RunConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_min_fitness(1.0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("c{}_p{}_g{}", n, pop, gen), n),
            &(prototype, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = Engine::run(black_box(p), &mut NsgaII::new(), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_random_schedule,
    bench_operators,
    bench_fitness_sort,
    bench_engine_nsga2
);
criterion_main!(benches);
