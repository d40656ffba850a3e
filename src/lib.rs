//! # ekgsim - Parametric 12-lead ECG synthesis
//!
//! ekgsim renders a simulated 12-lead cardiac electrical trace for teaching.
//! Every sample is produced by a deterministic, parametric function of the
//! lead, a continuous time value, the selected pathology, an effective heart
//! rate and a resolved set of shape and timing parameters.
//!
//! ## Overview
//!
//! - **Lead vectors**: static per-lead polarity/magnitude coefficients
//! - **Parameter store**: global parameters plus per-lead overrides
//! - **Preset catalog**: per-pathology defaults, overrides and findings
//! - **Intervals**: effective heart rate and PR/QRS/QT/QTc/axis
//! - **Synthesizer**: the morphology engine for 32 pathologies
//! - **Noise**: layered baseline wander, tremor, mains and motion artifact
//!
//! ## Quick Start
//!
//! ```rust
//! use ekgsim::prelude::*;
//!
//! let store = ParameterStore::new()
//!     .set_param(Param::ArtifactLevel, 0.0, LeadSelection::All);
//!
//! let hr = effective_hr(Pathology::SinusBrady, store.globals().heart_rate);
//! assert!(hr <= 59.0);
//!
//! let intervals = intervals(Pathology::SinusBrady, hr, store.globals());
//! assert_eq!(intervals.pr, Some(160));
//!
//! let mut synth = WaveformSynthesizer::new(NullNoise);
//! let params = store.resolved(LeadId::II);
//! let v = synth.sample(LeadId::II, 0.4, Pathology::SinusBrady, hr, &params);
//! assert!(v.is_finite());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialization of parameters, presets and traces
//! - `cli` (default): The `ekgsim` command-line front end

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]

pub mod catalog;
pub mod intervals;
pub mod noise;
pub mod render;
pub mod store;
pub mod synthesis;
pub mod types;
pub mod utils;

#[cfg(feature = "serde")]
pub mod config;
#[cfg(feature = "serde")]
pub mod serialization;

/// Re-export of commonly used types and functions for convenience.
pub mod prelude {
    pub use crate::catalog::{preset, PathologyPreset};
    pub use crate::intervals::{effective_hr, intervals, IntervalSet};
    pub use crate::noise::{ArtifactCompositor, NoiseSource, NullNoise, SeededNoise, ThreadNoise};
    pub use crate::render::{DisplayLayout, HeaderSummary, LeadStrip, Redraw, Simulator};
    pub use crate::store::ParameterStore;
    pub use crate::synthesis::{LeadVector, WaveformSynthesizer};
    pub use crate::types::{
        GlobalParameters, LeadId, LeadOverride, LeadOverrideMap, LeadSelection, Param,
        Pathology, Voltage,
    };
    pub use crate::utils::Random;

    #[cfg(feature = "serde")]
    pub use crate::config::SimulationConfig;
    #[cfg(feature = "serde")]
    pub use crate::serialization::{Serializable, SerializableFormat};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library.
///
/// Synthesis, interval math and store transitions are total and never fail.
/// Errors only arise at the edges: parsing names, loading configuration and
/// file IO.
pub mod error {
    use thiserror::Error;

    /// Main error type for ekgsim operations.
    #[derive(Error, Debug)]
    pub enum EkgError {
        /// A pathology key that is not part of the catalog.
        #[error("Unknown pathology '{0}'")]
        UnknownPathology(String),

        /// A lead name outside the 12 standard leads.
        #[error("Unknown lead '{0}'")]
        UnknownLead(String),

        /// A parameter name that does not exist.
        #[error("Unknown parameter '{0}'")]
        UnknownParameter(String),

        /// Invalid parameter value.
        #[error("Invalid parameter '{name}': {message}")]
        InvalidParameter {
            /// Name of the invalid parameter.
            name: &'static str,
            /// Description of the error.
            message: String,
        },

        /// Serialization error.
        #[cfg(feature = "serde")]
        #[error("Serialization error: {message}")]
        SerializationError {
            /// Description of the serialization error.
            message: String,
        },

        /// I/O error.
        #[error("I/O error: {message}")]
        IoError {
            /// Description of the I/O error.
            message: String,
        },
    }

    /// Result type alias using EkgError.
    pub type Result<T> = std::result::Result<T, EkgError>;
}

pub use error::{EkgError, Result};
