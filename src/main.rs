use anyhow::{Context, Result};
use clap::Parser;
use protocell_core::config::AppConfig;
use protocell_core::{init_logging, Registry};
use protocell_lib::model::World;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Compound/process registry definition file
    #[arg(short, long, default_value = "registry.toml")]
    registry: String,

    /// Override the number of ticks to run
    #[arg(short, long)]
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = AppConfig::load(&args.config);
    let registry = Arc::new(
        Registry::load(&args.registry)
            .with_context(|| format!("loading registry from {}", args.registry))?,
    );
    let ticks = args.ticks.unwrap_or(config.simulation.ticks);
    let tick_ms = config.simulation.tick_ms;

    let mut world = World::new(config.clone(), registry.clone());
    for species in &config.species {
        let mut capacities = Vec::with_capacity(species.capacities.len());
        for (process_name, &rate) in &species.capacities {
            let id = registry.process_by_name(process_name).with_context(|| {
                format!(
                    "species '{}' references unknown process '{process_name}'",
                    species.name
                )
            })?;
            capacities.push((id, rate));
        }
        world.register_species(&species.name, &capacities);
    }

    let population = config.world.initial_population;
    anyhow::ensure!(
        population == 0 || !config.species.is_empty(),
        "config requests {population} organisms but defines no species"
    );
    for i in 0..population {
        let species = &config.species[i % config.species.len()];
        world.spawn_organism(&species.name)?;
    }
    tracing::info!(
        organisms = population,
        species = config.species.len(),
        compounds = registry.compound_count(),
        "world initialized"
    );

    for _ in 0..ticks {
        world.update(tick_ms)?;
    }

    tracing::info!(
        ticks = world.tick,
        organisms = world.organism_count(),
        processes_run = world.metrics.processes_run(),
        elapsed_ms = world.metrics.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(())
}
