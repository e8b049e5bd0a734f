mod common;

use common::xy_registry;
use proptest::prelude::*;
use protocell_core::run_processes;
use protocell_data::{CompoundBag, CompoundId, Processor};
use std::sync::{Arc, RwLock};

const X: CompoundId = CompoundId(0);

fn bag_with_empty_processor(registry: &protocell_core::Registry, storage: f32) -> CompoundBag {
    let mut bag = CompoundBag::new(storage, registry.compound_ids());
    bag.set_processor(Arc::new(RwLock::new(Processor::new())), "prop");
    bag
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Recomputed price is strictly decreasing in quantity.
    #[test]
    fn price_is_strictly_monotonic(q in 0.0f32..1e4, delta in 0.5f32..100.0) {
        let registry = xy_registry();
        let mut low = bag_with_empty_processor(&registry, 100.0);
        let mut high = bag_with_empty_processor(&registry, 100.0);
        low.give(X, q);
        high.give(X, q + delta);

        run_processes(&mut low, &registry, 1000.0).unwrap();
        run_processes(&mut high, &registry, 1000.0).unwrap();

        prop_assert!(high.price_of(X) < low.price_of(X));
        prop_assert!(low.price_of(X) > 0.0 && low.price_of(X) <= 1.0);
    }

    /// `take` returns min(requested, stored) and never goes negative.
    #[test]
    fn take_never_overdraws(stored in 0.0f32..1e6, requested in 0.0f32..1e6) {
        let registry = xy_registry();
        let mut bag = CompoundBag::new(100.0, registry.compound_ids());
        bag.give(X, stored);

        let taken = bag.take(X, requested);

        prop_assert_eq!(taken, requested.min(stored));
        prop_assert!(bag.amount_of(X) >= 0.0);
    }

    /// A bag with no storage is never touched, whatever it holds.
    #[test]
    fn zero_storage_is_invariant(q0 in 0.0f32..1e5, q1 in 0.0f32..1e5) {
        let registry = xy_registry();
        let mut bag = bag_with_empty_processor(&registry, 0.0);
        bag.give(CompoundId(0), q0);
        bag.give(CompoundId(1), q1);
        let before = bag.clone();

        run_processes(&mut bag, &registry, 1000.0).unwrap();

        prop_assert_eq!(&bag.compounds, &before.compounds);
        prop_assert_eq!(&bag.prices, &before.prices);
    }

    /// Quantities stay non-negative under repeated ticks for any starting
    /// endowment, because the feasibility cap binds before stock runs out.
    #[test]
    fn quantities_stay_non_negative(q in 0.0f32..1e4, capacity in 0.0f32..100.0) {
        let registry = xy_registry();
        let mut bag = CompoundBag::new(100.0, registry.compound_ids());
        let mut processor = Processor::new();
        processor.set_capacity(protocell_data::BioProcessId(0), capacity);
        bag.set_processor(Arc::new(RwLock::new(processor)), "prop");
        bag.give(X, q);

        for _ in 0..10 {
            run_processes(&mut bag, &registry, 1000.0).unwrap();
            for (&id, &amount) in &bag.compounds {
                prop_assert!(amount >= 0.0, "compound {:?} went negative: {}", id, amount);
            }
        }
    }
}
