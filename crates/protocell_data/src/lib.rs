//! Core data structures for the Protocell simulation.

pub mod data;

pub use data::components::{
    BioProcessId, CompoundBag, CompoundId, Identity, Processor, ProcessorHandle,
};
