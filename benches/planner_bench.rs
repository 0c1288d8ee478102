use criterion::{criterion_group, criterion_main, Criterion};
use heading_pathfinding::{DemoScene, ObstacleField, Planner, PlannerConfig, Point, TargetSelector};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn demo_bench(c: &mut Criterion) {
    let scene = DemoScene::new();
    let field = &scene.pathfinder.field;
    let start = scene.agent.position;
    for tries in [1, 4] {
        let planner = Planner::new(PlannerConfig::default().with_tries(tries)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        c.bench_function(format!("demo scene, {tries} tries").as_str(), |b| {
            b.iter(|| black_box(planner.plan(field, start, Point::new(150.0, 500.0), &mut rng)))
        });
    }
}

fn selector_bench(c: &mut Criterion) {
    let field = ObstacleField::new(700.0, 600.0);
    let end = Point::new(600.0, 500.0);
    let mut rng = StdRng::seed_from_u64(0);
    for rate in [0.0, 0.45, 1.0] {
        let config = PlannerConfig::default().with_rate(rate);
        let selector = TargetSelector::new(&field, end, &config).unwrap();
        c.bench_function(format!("single step, rate {rate}").as_str(), |b| {
            b.iter(|| black_box(selector.select(Point::new(100.0, 100.0), &mut rng)))
        });
    }
}

criterion_group!(benches, demo_bench, selector_bench);
criterion_main!(benches);
