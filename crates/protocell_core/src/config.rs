use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub initial_population: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    /// Tick duration, in the unit process capacities are expressed per.
    pub tick_ms: f32,
    pub ticks: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrganismConfig {
    pub storage_space: f32,
    /// Upper bound for the randomized starting quantity of each compound.
    pub initial_compound_max: f32,
}

/// A species template: the process capacities every organism of the
/// species shares, keyed by process name in the registry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    pub name: String,
    pub capacities: BTreeMap<String, f32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub simulation: SimulationConfig,
    pub organism: OrganismConfig,
    #[serde(default)]
    pub species: Vec<SpeciesConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                initial_population: 100,
                seed: None,
            },
            simulation: SimulationConfig {
                tick_ms: 1000.0,
                ticks: 1000,
            },
            organism: OrganismConfig {
                storage_space: 100.0,
                initial_compound_max: 10.0,
            },
            species: vec![SpeciesConfig {
                name: "protocell".into(),
                capacities: BTreeMap::from([("respiration".into(), 5.0)]),
            }],
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
        let default = Self::default();
        // Create default config file if missing
        if let Ok(content) = toml::to_string(&default) {
            let _ = fs::write(path, content);
        }
        default
    }
}
