//! Simulation configuration files.
//!
//! A configuration captures everything needed to reproduce a display: the
//! pathology, the full parameter store, the sampling layout and the noise
//! seed. Missing fields take their defaults, so a minimal JSON file such as
//! `{"pathology": "afib"}` is valid.

use crate::noise::{NoiseSource, SeededNoise, ThreadNoise};
use crate::render::{DisplayLayout, Simulator};
use crate::serialization::Serializable;
use crate::store::ParameterStore;
use crate::types::Pathology;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A saved simulator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Selected pathology.
    pub pathology: Pathology,
    /// Parameter state. Not re-derived from the preset on load.
    pub store: ParameterStore,
    /// Sampling layout.
    pub layout: DisplayLayout,
    /// Artifact noise seed; `None` draws fresh randomness each run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::for_pathology(Pathology::Normal)
    }
}

impl SimulationConfig {
    /// Configuration with `pathology` and its preset applied.
    pub fn for_pathology(pathology: Pathology) -> Self {
        Self {
            pathology,
            store: ParameterStore::from_preset(pathology),
            layout: DisplayLayout::default(),
            seed: None,
        }
    }

    /// Sets the noise seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads a configuration, inferring the format from the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::load_from_file_auto(path)?;
        debug!(path = %path.display(), pathology = %config.pathology, "loaded configuration");
        Ok(config)
    }

    /// Saves the configuration, inferring the format from the extension.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to_file_auto(path)
    }

    /// Builds a simulator with an explicit noise source.
    pub fn simulator_with<N: NoiseSource>(&self, noise: N) -> Simulator<N> {
        Simulator::with_state(self.pathology, self.store.clone(), noise)
    }

    /// Builds a seeded simulator. Without a configured seed, the seed is
    /// drawn from the thread generator.
    pub fn seeded_simulator(&self) -> Simulator<SeededNoise> {
        let seed = self.seed.unwrap_or_else(rand::random);
        self.simulator_with(SeededNoise::new(seed))
    }

    /// Builds an unseeded simulator.
    pub fn thread_simulator(&self) -> Simulator<ThreadNoise> {
        self.simulator_with(ThreadNoise)
    }
}
