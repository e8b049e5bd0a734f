//! Plain-data component types shared across the workspace.

pub mod components;
