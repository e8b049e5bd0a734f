//! Read-only compound and process metadata.
//!
//! The registry maps compound ids to unit volumes and process ids to
//! weighted input/output compound lists. It is fully populated before any
//! `CompoundBag` is constructed and never mutated during simulation; the
//! engine receives it by reference rather than through global state.

use protocell_data::{BioProcessId, CompoundId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse registry: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("process '{process}' references unknown compound id {compound}")]
    UnknownCompound { process: String, compound: u16 },
    #[error("process '{process}' input compound id {compound} has weight 0")]
    ZeroWeight { process: String, compound: u16 },
}

/// A compound known to the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundDef {
    pub name: String,
    pub unit_volume: f32,
}

/// One weighted compound reference inside a process definition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProcessCompound {
    pub compound: CompoundId,
    pub weight: u32,
}

/// A conversion rule turning weighted inputs into weighted outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessDef {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ProcessCompound>,
    #[serde(default)]
    pub outputs: Vec<ProcessCompound>,
}

/// Immutable compound/process metadata, indexed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    compounds: Vec<CompoundDef>,
    processes: Vec<ProcessDef>,
}

impl Registry {
    /// Builds a registry, validating cross-references and weights.
    ///
    /// An input weight of zero would divide by zero in the feasibility cap
    /// of the process system, so it is rejected here once instead of being
    /// re-checked every tick. Zero-weight outputs are rejected for
    /// symmetry.
    pub fn new(
        compounds: Vec<CompoundDef>,
        processes: Vec<ProcessDef>,
    ) -> Result<Self, RegistryError> {
        for process in &processes {
            for pc in process.inputs.iter().chain(&process.outputs) {
                if pc.compound.0 as usize >= compounds.len() {
                    return Err(RegistryError::UnknownCompound {
                        process: process.name.clone(),
                        compound: pc.compound.0,
                    });
                }
                if pc.weight == 0 {
                    return Err(RegistryError::ZeroWeight {
                        process: process.name.clone(),
                        compound: pc.compound.0,
                    });
                }
            }
        }
        Ok(Self {
            compounds,
            processes,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let raw: Registry = toml::from_str(content)?;
        Self::new(raw.compounds, raw.processes)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// All known compound ids, in ascending order.
    pub fn compound_ids(&self) -> impl Iterator<Item = CompoundId> + '_ {
        (0..self.compounds.len() as u16).map(CompoundId)
    }

    pub fn process_ids(&self) -> impl Iterator<Item = BioProcessId> + '_ {
        (0..self.processes.len() as u16).map(BioProcessId)
    }

    #[must_use]
    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    #[must_use]
    pub fn compound_name(&self, id: CompoundId) -> &str {
        &self.compounds[id.0 as usize].name
    }

    #[must_use]
    pub fn compound_by_name(&self, name: &str) -> Option<CompoundId> {
        self.compounds
            .iter()
            .position(|c| c.name == name)
            .map(|i| CompoundId(i as u16))
    }

    #[must_use]
    pub fn process_by_name(&self, name: &str) -> Option<BioProcessId> {
        self.processes
            .iter()
            .position(|p| p.name == name)
            .map(|i| BioProcessId(i as u16))
    }

    #[must_use]
    pub fn unit_volume(&self, id: CompoundId) -> f32 {
        self.compounds[id.0 as usize].unit_volume
    }

    #[must_use]
    pub fn process_name(&self, id: BioProcessId) -> &str {
        &self.processes[id.0 as usize].name
    }

    #[must_use]
    pub fn process_inputs(&self, id: BioProcessId) -> &[ProcessCompound] {
        &self.processes[id.0 as usize].inputs
    }

    #[must_use]
    pub fn process_outputs(&self, id: BioProcessId) -> &[ProcessCompound] {
        &self.processes[id.0 as usize].outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> (Vec<CompoundDef>, Vec<ProcessDef>) {
        let compounds = vec![
            CompoundDef {
                name: "glucose".into(),
                unit_volume: 1.0,
            },
            CompoundDef {
                name: "atp".into(),
                unit_volume: 0.5,
            },
        ];
        let processes = vec![ProcessDef {
            name: "respiration".into(),
            inputs: vec![ProcessCompound {
                compound: CompoundId(0),
                weight: 1,
            }],
            outputs: vec![ProcessCompound {
                compound: CompoundId(1),
                weight: 2,
            }],
        }];
        (compounds, processes)
    }

    #[test]
    fn test_registry_lookups() {
        let (compounds, processes) = defs();
        let registry = Registry::new(compounds, processes).unwrap();
        assert_eq!(registry.compound_count(), 2);
        assert_eq!(registry.unit_volume(CompoundId(1)), 0.5);
        assert_eq!(registry.process_name(BioProcessId(0)), "respiration");
        assert_eq!(registry.process_outputs(BioProcessId(0))[0].weight, 2);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let (compounds, mut processes) = defs();
        processes[0].inputs[0].weight = 0;
        assert!(matches!(
            Registry::new(compounds, processes),
            Err(RegistryError::ZeroWeight { .. })
        ));
    }

    #[test]
    fn test_unknown_compound_rejected() {
        let (compounds, mut processes) = defs();
        processes[0].outputs[0].compound = CompoundId(9);
        assert!(matches!(
            Registry::new(compounds, processes),
            Err(RegistryError::UnknownCompound { .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let registry = Registry::from_toml_str(
            r#"
            [[compounds]]
            name = "glucose"
            unit_volume = 1.0

            [[compounds]]
            name = "oxygen"
            unit_volume = 0.2

            [[processes]]
            name = "respiration"
            inputs = [{ compound = 0, weight = 1 }, { compound = 1, weight = 6 }]
            outputs = []
            "#,
        )
        .unwrap();
        assert_eq!(registry.compound_count(), 2);
        assert_eq!(registry.process_inputs(BioProcessId(0)).len(), 2);
    }
}
