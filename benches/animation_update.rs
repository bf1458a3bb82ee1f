use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use server_room::animation::PhaseSource;
use server_room::config::{AnimationConfig, LayoutConfig};
use server_room::scene::palette::DARK;
use server_room::scene::InstanceBatches;
use server_room::scenes::{compose_server_room, ServerRoom};

fn room(racks_per_row: usize) -> ServerRoom {
    let layout = LayoutConfig {
        racks_per_row,
        ..LayoutConfig::default()
    };
    let mut source = PhaseSource::seeded(1);
    compose_server_room(&layout, &AnimationConfig::default(), &DARK, &mut source)
}

/// Benchmark: animator pass over every animated node
fn bench_animator_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("animator_update");
    for racks in [5, 20, 80] {
        let mut room = room(racks);
        group.bench_with_input(BenchmarkId::from_parameter(room.animator.len()), &racks, |b, _| {
            let mut t = 0.0_f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                black_box(room.animator.update(black_box(t), &mut room.graph))
            })
        });
    }
    group.finish();
}

/// Benchmark: world transforms and instance batching for a full frame
fn bench_collect_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_instances");
    for racks in [5, 20, 80] {
        let mut room = room(racks);
        room.animator.update(1.0, &mut room.graph);
        let mut batches = InstanceBatches::default();
        group.bench_with_input(BenchmarkId::from_parameter(room.graph.len()), &racks, |b, _| {
            b.iter(|| {
                room.graph.collect_instances(&mut batches);
                black_box(batches.total())
            })
        });
    }
    group.finish();
}

/// Benchmark: composing the default room from scratch
fn bench_compose(c: &mut Criterion) {
    c.bench_function("compose_default_room", |b| b.iter(|| black_box(room(5).graph.len())));
}

criterion_group!(benches, bench_animator_update, bench_collect_instances, bench_compose);
criterion_main!(benches);
