use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Opaque registry index of a compound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct CompoundId(pub u16);

/// Opaque registry index of a biological process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct BioProcessId(pub u16);

/// Unique identification of an organism.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
}

impl Identity {
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Builds an identity from caller-supplied random bytes, for worlds
    /// that draw ids from a seeded rng.
    #[must_use]
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self {
            id: uuid::Builder::from_random_bytes(bytes).into_uuid(),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-species table of maximum process throughput rates.
///
/// One table is shared read-only by every organism of the species; the
/// process system never writes to it. A missing entry means capacity 0
/// (the process never runs). `BTreeMap` keeps iteration in ascending
/// process id order, which fixes the within-tick execution order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Processor {
    pub capacities: BTreeMap<BioProcessId, f32>,
}

impl Processor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites (or inserts) the capacity for a process. Negative rates
    /// clamp to zero.
    pub fn set_capacity(&mut self, id: BioProcessId, capacity: f32) {
        self.capacities.insert(id, capacity.max(0.0));
    }

    #[must_use]
    pub fn capacity(&self, id: BioProcessId) -> f32 {
        self.capacities.get(&id).copied().unwrap_or(0.0)
    }
}

/// Shared handle to a species' processor table.
///
/// Bound once at configuration time; ticks only ever take read locks, the
/// write side exists for explicit reconfiguration between ticks.
pub type ProcessorHandle = Arc<RwLock<Processor>>;

/// Per-organism compound store with market-clearing prices.
///
/// Quantities and prices carry an entry for every registry-known compound
/// from construction onward. `storage_occupied` is recomputed by the
/// process system at the start of every tick, never carried over stale.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompoundBag {
    pub compounds: BTreeMap<CompoundId, f32>,
    pub prices: BTreeMap<CompoundId, f32>,
    pub storage_space: f32,
    #[serde(skip)]
    pub storage_occupied: f32,
    pub species: String,
    #[serde(skip)]
    pub processor: Option<ProcessorHandle>,
}

impl CompoundBag {
    /// Creates a bag holding every known compound at quantity 0, price 1.
    #[must_use]
    pub fn new(storage_space: f32, compound_ids: impl IntoIterator<Item = CompoundId>) -> Self {
        let mut compounds = BTreeMap::new();
        let mut prices = BTreeMap::new();
        for id in compound_ids {
            compounds.insert(id, 0.0);
            prices.insert(id, 1.0);
        }
        Self {
            compounds,
            prices,
            storage_space,
            storage_occupied: 0.0,
            species: String::new(),
            processor: None,
        }
    }

    /// Binds the shared processor table and records the owning species.
    pub fn set_processor(&mut self, processor: ProcessorHandle, species: impl Into<String>) {
        self.processor = Some(processor);
        self.species = species.into();
    }

    /// Unchecked increment; a negative `amount` is the caller's business.
    pub fn give(&mut self, id: CompoundId, amount: f32) {
        *self.compounds.entry(id).or_insert(0.0) += amount;
    }

    /// Removes up to `amount`, returning what was actually removed. Never
    /// drives the stored quantity negative.
    pub fn take(&mut self, id: CompoundId, amount: f32) -> f32 {
        let stored = self.compounds.entry(id).or_insert(0.0);
        let taken = amount.min(*stored);
        *stored -= taken;
        taken
    }

    #[must_use]
    pub fn amount_of(&self, id: CompoundId) -> f32 {
        self.compounds.get(&id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn price_of(&self, id: CompoundId) -> f32 {
        self.prices.get(&id).copied().unwrap_or(1.0)
    }
}
