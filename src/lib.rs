//! Protocell — a per-organism economic resource-conversion simulation.
//!
//! The library glues the `protocell_core` engine to a `hecs` entity world:
//! [`model::world::World`] owns the organisms and drives the
//! market-clearing process system once per tick over every living one.

pub mod model;
