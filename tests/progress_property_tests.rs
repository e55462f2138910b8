//! Property tests for counter bookkeeping.
//!
//! The grant state machine is checked directly, then the engine is checked
//! against a simple model over arbitrary increment sequences.

use proptest::prelude::*;

use rust_advancements::catalog::{AdvancementDefinition, MemoryCatalog};
use rust_advancements::core::{NamespacedKey, SubjectId};
use rust_advancements::engine::AdvancementEngine;
use rust_advancements::events::{Event, EventTypeId};
use rust_advancements::grant::{GrantMode, COMPLETED_SENTINEL};
use rust_advancements::progress::MemoryProgressStore;
use rust_advancements::triggers::Increment;

const ALICE: SubjectId = SubjectId(1);

fn grant_mode() -> impl Strategy<Value = GrantMode> {
    prop_oneof![Just(GrantMode::AllAtOnce), Just(GrantMode::StepByStep)]
}

fn engine_with(mode: GrantMode, target: i64) -> AdvancementEngine<MemoryCatalog, MemoryProgressStore> {
    let mut catalog = MemoryCatalog::new();
    catalog.register(AdvancementDefinition::new(NamespacedKey::parse("demo:miner").unwrap(), "Miner").with_steps(8));

    let mut engine = AdvancementEngine::new(catalog, MemoryProgressStore::new());
    engine
        .trigger_on("demo:miner", EventTypeId::BLOCK_BROKEN)
        .target_value(target)
        .grant_mode(mode)
        .increment(Increment::Value { index: 0 })
        .build()
        .unwrap();
    engine
}

proptest! {
    /// Non-positive increments are always discarded.
    #[test]
    fn non_positive_increment_is_discarded(
        mode in grant_mode(),
        current in -1i64..1_000,
        increment in i64::MIN..=0,
        target in 1i64..100,
    ) {
        prop_assert_eq!(mode.plan(current, increment, target), None);
    }

    /// Step-by-step conserves progress: fires * target + remainder == sum.
    #[test]
    fn step_by_step_conserves_progress(
        current in 0i64..1_000,
        increment in 1i64..1_000,
        target in 1i64..100,
    ) {
        let plan = GrantMode::StepByStep.plan(current, increment, target).unwrap();

        prop_assert!(plan.counter >= 0 && plan.counter < target);
        prop_assert_eq!(plan.fires as i64 * target + plan.counter, current + increment);
    }

    /// All-at-once fires at most once and parks at the sentinel.
    #[test]
    fn all_at_once_fires_at_most_once(
        current in 0i64..1_000,
        increment in 1i64..1_000,
        target in 1i64..100,
    ) {
        let plan = GrantMode::AllAtOnce.plan(current, increment, target).unwrap();
        let sum = current + increment;

        if sum >= target {
            prop_assert_eq!(plan.fires, 1);
            prop_assert_eq!(plan.counter, COMPLETED_SENTINEL);
        } else {
            prop_assert_eq!(plan.fires, 0);
            prop_assert_eq!(plan.counter, sum);
        }
    }

    /// The engine's stored counter follows the grant state machine.
    #[test]
    fn engine_matches_model(
        mode in grant_mode(),
        target in 1i64..10,
        increments in proptest::collection::vec(-5i64..20, 0..30),
    ) {
        let mut engine = engine_with(mode, target);
        let mut model = 0i64;
        let mut model_fires = 0u64;
        let mut total_fires = 0u64;

        for amount in increments {
            let report = engine.dispatch(&Event::block_broken(ALICE, "stone").with_value(amount));
            total_fires += report.grants.iter().map(|grant| grant.fires).sum::<u64>();

            if let Some(plan) = mode.plan(model, amount, target) {
                model = plan.counter;
                model_fires += plan.fires;
            }
            prop_assert_eq!(engine.progress("demo:miner", ALICE).unwrap(), model);
            prop_assert_eq!(total_fires, model_fires);
        }
    }
}
