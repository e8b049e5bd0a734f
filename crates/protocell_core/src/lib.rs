//! # Protocell Core
//!
//! The simulation engine for Protocell — a per-organism economic
//! resource-conversion simulation.
//!
//! Every organism holds a bag of compound quantities and a table of
//! process capacities. Once per tick the engine recomputes the organism's
//! internal market: scarce compounds become expensive, abundant ones
//! cheap, and a process only runs when the price-weighted value of its
//! outputs exceeds that of its inputs, capped by storage and by the
//! scarcest required input.
//!
//! ## Architecture
//!
//! - **Component-based organisms**: `CompoundBag` + shared `Processor`
//!   tables from `protocell_data`
//! - **System-based updates**: the market-clearing process system in
//!   [`systems::process`]
//! - **Injected metadata**: the compound/process [`registry::Registry`]
//!   is passed by reference, never global state
//! - **Deterministic simulation**: ordered maps fix within-tick process
//!   order; drivers seed their RNGs

/// Configuration management for simulation parameters
pub mod config;
/// Performance metrics collection and logging
pub mod metrics;
/// Read-only compound and process metadata
pub mod registry;
/// Core simulation systems (market-clearing process execution)
pub mod systems;

pub use metrics::{init_logging, Metrics};
pub use registry::Registry;
pub use systems::process::{run_processes, ProcessError, TIME_SCALING_FACTOR};
