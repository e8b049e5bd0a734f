//! Market-clearing process execution.
//!
//! Each organism runs an implicit internal market once per tick: compound
//! scarcity sets prices, prices decide which processes are worth running,
//! and feasibility plus storage pressure cap how much of each process
//! actually runs.

use crate::registry::Registry;
use protocell_data::CompoundBag;
use thiserror::Error;

/// Base throughput normalization: a process at capacity `c` converts
/// `c * delta_ms / TIME_SCALING_FACTOR` units per tick when profitable.
pub const TIME_SCALING_FACTOR: f32 = 1000.0;

#[derive(Error, Debug)]
pub enum ProcessError {
    /// The bag was never bound to a processor table. This is a setup bug
    /// upstream, surfaced at the point of use rather than skipped.
    #[error("organism of species '{species}' has no bound processor table")]
    UnboundProcessor { species: String },
}

/// Runs one market-clearing pass over a single organism's bag.
///
/// `delta_ms` is the tick duration in the unit capacities are expressed
/// per. Returns the number of processes that executed at a non-zero rate.
///
/// A bag with `storage_space <= 0` is an inactive organism (for example a
/// species template with no physical body): nothing is touched, not even
/// prices, and the skip takes precedence over the processor-binding
/// precondition — an inactive organism is tolerated unbound. Processes run
/// in ascending process id order and earlier processes' quantity changes
/// are visible to later ones within the same tick.
pub fn run_processes(
    bag: &mut CompoundBag,
    registry: &Registry,
    delta_ms: f32,
) -> Result<usize, ProcessError> {
    // Avoiding zero-division errors.
    if bag.storage_space <= 0.0 {
        return Ok(0);
    }

    let processor = bag
        .processor
        .clone()
        .ok_or_else(|| ProcessError::UnboundProcessor {
            species: bag.species.clone(),
        })?;

    bag.storage_occupied = bag.compounds.values().sum();

    // Phase one: setting up the prices.
    for (&id, &amount) in &bag.compounds {
        bag.prices.insert(id, 1.0 / (amount + 1.0));
    }

    // Phase two: running the processes.
    let processor = processor.read().unwrap_or_else(|e| e.into_inner());
    let mut executed = 0;
    for (&process_id, &capacity) in &processor.capacities {
        // The maximum throughput this process could reach with the
        // current amount of input compounds.
        let mut process_limit = capacity * delta_ms;

        let mut cost = 0.0;
        for input in registry.process_inputs(process_id) {
            // Weight 0 is invalid registry data, rejected at load time.
            debug_assert!(input.weight >= 1);
            let needed = input.weight as f32;
            let space_freed = needed * registry.unit_volume(input.compound);
            cost += bag.price_of(input.compound) * needed - space_freed / bag.storage_space;

            // Limiting the process by the amount of this required compound.
            process_limit = process_limit.min(bag.amount_of(input.compound) / needed);
        }

        let mut revenue = 0.0;
        for output in registry.process_outputs(process_id) {
            let generated = output.weight as f32;
            let space_used = generated * registry.unit_volume(output.compound);
            revenue += bag.price_of(output.compound) * generated - space_used / bag.storage_space;
        }

        if revenue <= cost {
            continue;
        }
        let rate = (capacity * delta_ms / TIME_SCALING_FACTOR).min(process_limit);
        if rate <= 0.0 {
            continue;
        }
        executed += 1;

        // Transforming the inputs into the outputs. Visible to later
        // processes in this same pass.
        for input in registry.process_inputs(process_id) {
            bag.give(input.compound, -(rate * input.weight as f32));
        }
        for output in registry.process_outputs(process_id) {
            bag.give(output.compound, rate * output.weight as f32);
        }
    }

    tracing::trace!(
        species = %bag.species,
        executed = executed,
        occupied = bag.storage_occupied,
        "market-clearing pass"
    );
    Ok(executed)
}
