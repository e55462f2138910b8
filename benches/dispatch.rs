use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use rust_advancements::catalog::{AdvancementDefinition, MemoryCatalog};
use rust_advancements::core::{NamespacedKey, SubjectId};
use rust_advancements::engine::AdvancementEngine;
use rust_advancements::events::{Event, EventTypeId};
use rust_advancements::grant::GrantMode;
use rust_advancements::progress::MemoryProgressStore;
use rust_advancements::triggers::TriggerCondition;

const TRIGGERS: usize = 64;

fn make_engine() -> AdvancementEngine<MemoryCatalog, MemoryProgressStore> {
    let mut catalog = MemoryCatalog::new();
    for i in 0..TRIGGERS {
        let key = NamespacedKey::new("bench", format!("miner_{i}")).unwrap();
        catalog.register(AdvancementDefinition::new(key, format!("Miner {i}")).with_steps(16));
    }

    let mut engine = AdvancementEngine::new(catalog, MemoryProgressStore::new());

    // Half listen on the exact type, half on a supertype.
    for i in 0..TRIGGERS {
        let event_type = if i % 2 == 0 { EventTypeId::BLOCK_BROKEN } else { EventTypeId::BLOCK };
        engine
            .trigger_on(format!("bench:miner_{i}"), event_type)
            .condition(TriggerCondition::block_is(if i % 4 < 2 { "stone" } else { "dirt" }))
            .extractor(rust_advancements::triggers::SubjectExtractor::Actor)
            .target_value(10)
            .grant_mode(GrantMode::StepByStep)
            .build()
            .unwrap();
    }

    engine
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("block_broken_64_triggers", |b| {
        let mut engine = make_engine();
        let mut subject = 0u64;
        b.iter(|| {
            subject = (subject + 1) % 128;
            let event = Event::block_broken(SubjectId::new(subject), "stone");
            black_box(engine.dispatch(black_box(&event)))
        });
    });

    group.bench_function("no_matching_triggers", |b| {
        let mut engine = make_engine();
        let event = Event::subject_jumped(SubjectId::new(1));
        b.iter(|| black_box(engine.dispatch(black_box(&event))));
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = make_engine();
    for subject in 0..256 {
        engine.dispatch(&Event::block_broken(SubjectId::new(subject), "stone"));
    }

    c.bench_function("store/snapshot", |b| b.iter(|| black_box(engine.store().snapshot())));
    c.bench_function("store/to_bytes", |b| b.iter(|| black_box(engine.store().to_bytes().unwrap())));
}

criterion_group!(benches, bench_dispatch, bench_snapshot);
criterion_main!(benches);
