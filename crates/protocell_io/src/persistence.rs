//! Component codecs over [`StorageContainer`] plus JSON file save/load.
//!
//! Compound and process maps store under string-encoded integer keys, the
//! schema the rest of the toolchain expects. A loaded bag comes back with
//! no processor bound; the caller re-establishes the binding through
//! `set_processor`. Prices are written but are a recomputed cache, so a
//! container without them still loads.

use crate::error::{IoError, Result};
use crate::storage::StorageContainer;
use protocell_data::{BioProcessId, CompoundBag, CompoundId, Processor};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const KEY_PROCESSES: &str = "processes";
const KEY_COMPOUNDS: &str = "compounds";
const KEY_PRICES: &str = "prices";
const KEY_STORAGE_SPACE: &str = "storage_space";
const KEY_SPECIES: &str = "species";

/// Serialize/deserialize a component through a [`StorageContainer`].
pub trait ContainerCodec: Sized {
    fn to_container(&self) -> StorageContainer;
    fn from_container(container: &StorageContainer) -> Result<Self>;
}

impl ContainerCodec for Processor {
    fn to_container(&self) -> StorageContainer {
        let mut processes = StorageContainer::new();
        for (id, capacity) in &self.capacities {
            processes.set_f32(id.0.to_string(), *capacity);
        }
        let mut container = StorageContainer::new();
        container.set_container(KEY_PROCESSES, processes);
        container
    }

    fn from_container(container: &StorageContainer) -> Result<Self> {
        let processes = container.get_container(KEY_PROCESSES)?;
        let mut capacities = BTreeMap::new();
        for key in processes.keys() {
            capacities.insert(BioProcessId(parse_id(key)?), processes.get_f32(key)?);
        }
        Ok(Self { capacities })
    }
}

impl ContainerCodec for CompoundBag {
    fn to_container(&self) -> StorageContainer {
        let mut compounds = StorageContainer::new();
        for (id, amount) in &self.compounds {
            compounds.set_f32(id.0.to_string(), *amount);
        }
        let mut prices = StorageContainer::new();
        for (id, price) in &self.prices {
            prices.set_f32(id.0.to_string(), *price);
        }
        let mut container = StorageContainer::new();
        container.set_container(KEY_COMPOUNDS, compounds);
        container.set_container(KEY_PRICES, prices);
        container.set_f32(KEY_STORAGE_SPACE, self.storage_space);
        container.set_str(KEY_SPECIES, self.species.clone());
        container
    }

    fn from_container(container: &StorageContainer) -> Result<Self> {
        let stored = container.get_container(KEY_COMPOUNDS)?;
        let mut compounds = BTreeMap::new();
        for key in stored.keys() {
            compounds.insert(CompoundId(parse_id(key)?), stored.get_f32(key)?);
        }

        // Prices are a derived cache; default to 1 when absent.
        let mut prices: BTreeMap<_, _> = compounds.keys().map(|&id| (id, 1.0)).collect();
        if let Ok(stored_prices) = container.get_container(KEY_PRICES) {
            for key in stored_prices.keys() {
                prices.insert(CompoundId(parse_id(key)?), stored_prices.get_f32(key)?);
            }
        }

        Ok(Self {
            compounds,
            prices,
            storage_space: container.get_f32(KEY_STORAGE_SPACE)?,
            storage_occupied: 0.0,
            species: container.get_str(KEY_SPECIES)?.to_string(),
            processor: None,
        })
    }
}

fn parse_id(key: &str) -> Result<u16> {
    key.parse()
        .map_err(|_| IoError::validation(format!("key '{key}' is not an integer id")))
}

/// Writes a container to disk as pretty JSON, atomically (tmp + rename).
pub fn save_container<P: AsRef<Path>>(container: &StorageContainer, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, container)?;
    }
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

pub fn load_container<P: AsRef<Path>>(path: P) -> Result<StorageContainer> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let container = serde_json::from_reader(reader)?;
    Ok(container)
}
