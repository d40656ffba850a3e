//! Core types for the simulator.
//!
//! This module contains the closed enumerations (leads, pathologies,
//! parameters) and the parameter records that every other component shares.

mod lead;
mod params;
mod pathology;
mod primitives;

pub use lead::*;
pub use params::*;
pub use pathology::*;
pub use primitives::*;
