//! Core simulation systems.

pub mod process;
