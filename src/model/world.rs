use anyhow::{anyhow, Result};
use protocell_core::config::AppConfig;
use protocell_core::systems::process::run_processes;
use protocell_core::{Metrics, Registry};
use protocell_data::{BioProcessId, CompoundBag, Identity, Processor, ProcessorHandle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// The simulation world: organisms, their shared species processor
/// tables, and the tick driver.
pub struct World {
    pub tick: u64,
    pub ecs: hecs::World,
    pub registry: Arc<Registry>,
    pub config: AppConfig,
    pub metrics: Metrics,
    species_tables: HashMap<String, ProcessorHandle>,
    known_organisms: HashSet<hecs::Entity>,
    rng: ChaCha8Rng,
}

impl World {
    #[must_use]
    pub fn new(config: AppConfig, registry: Arc<Registry>) -> Self {
        let seed = config.world.seed.unwrap_or(0);
        Self {
            tick: 0,
            ecs: hecs::World::new(),
            registry,
            config,
            metrics: Metrics::new(),
            species_tables: HashMap::new(),
            known_organisms: HashSet::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Installs (or replaces) the shared processor table for a species.
    /// Every organism spawned for the species binds to this one table.
    pub fn register_species(
        &mut self,
        name: &str,
        capacities: &[(BioProcessId, f32)],
    ) -> ProcessorHandle {
        let mut processor = Processor::new();
        for &(id, rate) in capacities {
            processor.set_capacity(id, rate);
        }
        let handle: ProcessorHandle = Arc::new(RwLock::new(processor));
        self.species_tables
            .insert(name.to_string(), handle.clone());
        handle
    }

    #[must_use]
    pub fn species_processor(&self, name: &str) -> Option<&ProcessorHandle> {
        self.species_tables.get(name)
    }

    /// Reconfigures one capacity on a species' shared table. Takes effect
    /// for every organism of the species from the next tick on.
    pub fn set_species_capacity(
        &mut self,
        species: &str,
        process: BioProcessId,
        rate: f32,
    ) -> Result<()> {
        let handle = self
            .species_tables
            .get(species)
            .ok_or_else(|| anyhow!("unknown species '{species}'"))?;
        handle
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .set_capacity(process, rate);
        Ok(())
    }

    /// Spawns one organism of a registered species. Both its identity and
    /// its randomized initial compound endowment are drawn from the seeded
    /// world rng.
    pub fn spawn_organism(&mut self, species: &str) -> Result<hecs::Entity> {
        let handle = self
            .species_tables
            .get(species)
            .ok_or_else(|| anyhow!("cannot spawn organism of unknown species '{species}'"))?
            .clone();

        let mut bag = CompoundBag::new(
            self.config.organism.storage_space,
            self.registry.compound_ids(),
        );
        bag.set_processor(handle, species);
        let max = self.config.organism.initial_compound_max;
        if max > 0.0 {
            for id in self.registry.compound_ids() {
                bag.give(id, self.rng.gen_range(0.0..max));
            }
        }

        let identity = Identity::from_random_bytes(self.rng.gen());
        Ok(self.ecs.spawn((identity, bag)))
    }

    #[must_use]
    pub fn organism_count(&self) -> usize {
        self.ecs.query::<&CompoundBag>().iter().count()
    }

    /// Advances the simulation by one tick.
    ///
    /// `delta_ms` is the tick duration in the unit process capacities are
    /// expressed per. Organisms are updated in ascending identity order;
    /// because spawn draws identities from the seeded world rng, that order
    /// is the same across runs with the same seed. A failing organism is
    /// logged and counted without aborting the tick for the others.
    pub fn update(&mut self, delta_ms: f32) -> Result<()> {
        let started = Instant::now();
        self.tick += 1;

        let mut organisms: Vec<(hecs::Entity, uuid::Uuid)> = self
            .ecs
            .query::<(&Identity, &CompoundBag)>()
            .iter()
            .map(|(handle, (ident, _))| (handle, ident.id))
            .collect();
        organisms.sort_by_key(|&(_, id)| id);

        self.diff_organism_set(&organisms);

        let mut processes_run = 0;
        for &(handle, id) in &organisms {
            let Ok(bag) = self.ecs.query_one_mut::<&mut CompoundBag>(handle) else {
                continue;
            };
            match run_processes(bag, &self.registry, delta_ms) {
                Ok(n) => processes_run += n,
                Err(e) => {
                    self.metrics.increment_counter("update_failures");
                    tracing::error!(organism = %id, error = %e, "organism update failed");
                }
            }
        }

        self.metrics
            .record_tick(started.elapsed(), organisms.len(), processes_run);
        Ok(())
    }

    /// Tracks which organisms appeared or disappeared since the last tick
    /// and feeds the change hooks.
    fn diff_organism_set(&mut self, organisms: &[(hecs::Entity, uuid::Uuid)]) {
        let current: HashSet<hecs::Entity> = organisms.iter().map(|&(h, _)| h).collect();
        let added: Vec<_> = current
            .difference(&self.known_organisms)
            .copied()
            .collect();
        let removed: Vec<_> = self
            .known_organisms
            .difference(&current)
            .copied()
            .collect();
        self.on_organisms_added(&added);
        self.on_organisms_removed(&removed);
        self.known_organisms = current;
    }

    /// Extension point for per-organism setup.
    fn on_organisms_added(&mut self, _added: &[hecs::Entity]) {}

    /// Extension point for per-organism teardown.
    fn on_organisms_removed(&mut self, _removed: &[hecs::Entity]) {}
}
