//! Waveform synthesis.
//!
//! A sample is a pure function of (lead, time, pathology, heart rate,
//! resolved parameters) plus the artifact layer, which is the only part
//! that consumes randomness. The pipeline for one sample:
//!
//! 1. Optional RR warping of time (respiratory sinus arrhythmia)
//! 2. Phase and beat index within the cardiac cycle
//! 3. Deterministic per-beat variability
//! 4. The pathology's morphology strategy
//! 5. Generic ST shaping, variability and height scaling
//! 6. Recording artifact
//!
//! # Example
//!
//! ```rust
//! use ekgsim::prelude::*;
//!
//! let params = GlobalParameters {
//!     artifact_level: 0.0,
//!     rr_variability: 0.0,
//!     wave_irregularity: 0.0,
//!     ..GlobalParameters::default()
//! };
//! let mut synth = WaveformSynthesizer::new(NullNoise);
//!
//! // Samples are reproducible without artifact.
//! let a = synth.sample(LeadId::V2, 1.25, Pathology::Normal, 75.0, &params);
//! let b = synth.sample(LeadId::V2, 1.25, Pathology::Normal, 75.0, &params);
//! assert_eq!(a, b);
//! ```

pub mod lead_vectors;
pub mod morphology;
pub mod primitives;
pub mod template;
pub mod variability;

pub use lead_vectors::LeadVector;
pub use primitives::Shaper;
pub use template::{normal_complex, Beat, BeatTiming, ShapeFactors, Waves};
pub use variability::BeatVariability;

use crate::intervals::usable_hr;
use crate::noise::{ArtifactCompositor, NoiseSource};
use crate::types::{Bpm, GlobalParameters, LeadId, Pathology, Voltage};
use morphology::Morphology;
use std::f64::consts::PI;

pub use crate::intervals::FALLBACK_HR;

/// Peak RR warp at 100% variability (s).
const RR_WARP_SCALE: f64 = 0.25;

/// Respiratory time offset added to raw time before phase is computed.
pub fn rr_offset(t: f64, rr_variability: f64) -> f64 {
    if rr_variability <= 0.0 {
        return 0.0;
    }
    rr_variability / 100.0
        * RR_WARP_SCALE
        * ((t * 0.4).sin() * 0.5
            + (t * 0.7).sin() * 0.3
            + (t * 1.5).sin() * 0.15
            + (t * 2.9).sin() * 0.05)
}

/// Builds the beat context for one sample.
///
/// `organized` enables RR warping and beat variability.
pub fn beat_context(
    lead: Option<LeadId>,
    t: f64,
    hr: Bpm,
    params: &GlobalParameters,
    organized: bool,
) -> Beat {
    let hr = usable_hr(hr);
    let offset = if organized {
        rr_offset(t, params.rr_variability)
    } else {
        0.0
    };
    let adjusted = t + offset;
    let cycle = 60.0 / hr;

    let variability = if organized {
        BeatVariability::for_beat((adjusted / cycle).floor() as i64, params.wave_irregularity)
    } else {
        BeatVariability::IDENTITY
    };
    let factors = ShapeFactors::from_params(params);

    Beat {
        lead,
        vector: LeadVector::lookup(lead),
        time: t,
        phase: adjusted.rem_euclid(cycle) / cycle,
        index: (adjusted / cycle).floor() as i64,
        hr,
        factors,
        variability,
        shaper: Shaper::new(factors.width, variability.shift),
    }
}

/// Clean voltage for one sample: strategy, generic shaping, variability
/// and height. `morphology` of `None` selects the fallback template used
/// for unknown pathology keys.
fn clean(beat: &Beat, pathology: Option<Pathology>) -> f64 {
    let f = &beat.factors;
    let x = beat.phase;
    let strategy: Morphology = pathology.map_or_else(morphology::fallback, morphology::morphology);
    let mut value = strategy(beat);

    // Strategies without their own R descent handling get a generic
    // reshaping of the R downstroke.
    if pathology.is_none() && f.r_descent != 0.0 && x > 0.23 && x < 0.28 {
        let progress = (x - 0.23) / 0.05;
        value += value * f.r_descent * 0.2 * (1.0 - progress) * (progress * PI).sin();
    }

    let organized = pathology.map_or(true, Pathology::has_organized_activity);
    if organized && (f.st_shift != 0.0 || f.st_slope != 0.0) {
        value += beat.gaussian(0.33, 0.03 + f.j_curve * 0.04, f.st_shift * 0.3);
        if x > 0.34 && x < 0.48 {
            let progress = (x - 0.34) / 0.14;
            let level = f.st_shift * 0.35 + f.st_slope * 0.2 * (progress - 0.5);
            value += level * (progress * PI).sin();
        }
    }

    value * beat.variability.amplitude * f.height
}

/// Produces lead voltages from the morphology engine plus artifact.
#[derive(Debug, Clone)]
pub struct WaveformSynthesizer<N: NoiseSource> {
    noise: N,
    artifact: ArtifactCompositor,
}

impl<N: NoiseSource> WaveformSynthesizer<N> {
    /// Creates a synthesizer drawing artifact randomness from `noise`.
    pub fn new(noise: N) -> Self {
        Self {
            noise,
            artifact: ArtifactCompositor::new(),
        }
    }

    /// Returns the noise source.
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Voltage (mV) of `lead` at raw time `t` seconds.
    ///
    /// `hr` should be the effective rate for `pathology`; non-positive
    /// rates fall back to 75 bpm. Total: never panics and always returns a
    /// number.
    pub fn sample(
        &mut self,
        lead: LeadId,
        t: f64,
        pathology: Pathology,
        hr: Bpm,
        params: &GlobalParameters,
    ) -> Voltage {
        self.sample_with(Some(lead), t, Some(pathology), hr, params)
    }

    /// String-keyed variant of [`sample`](Self::sample).
    ///
    /// An unrecognized lead name uses the fallback lead vector and belongs
    /// to no lead group. An unrecognized pathology key renders the normal
    /// template.
    pub fn sample_keyed(
        &mut self,
        lead: &str,
        t: f64,
        pathology: &str,
        hr: Bpm,
        params: &GlobalParameters,
    ) -> Voltage {
        let lead = lead.parse().ok();
        let pathology = Pathology::from_key(pathology);
        self.sample_with(lead, t, pathology, hr, params)
    }

    fn sample_with(
        &mut self,
        lead: Option<LeadId>,
        t: f64,
        pathology: Option<Pathology>,
        hr: Bpm,
        params: &GlobalParameters,
    ) -> Voltage {
        let organized = pathology.map_or(true, Pathology::has_organized_activity);
        let beat = beat_context(lead, t, hr, params, organized);
        let value = clean(&beat, pathology);
        self.artifact
            .apply(value, t, params.artifact_level, &mut self.noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NullNoise, SeededNoise};

    fn quiet() -> GlobalParameters {
        GlobalParameters {
            artifact_level: 0.0,
            rr_variability: 0.0,
            wave_irregularity: 0.0,
            ..GlobalParameters::default()
        }
    }

    #[test]
    fn test_rr_offset_disabled() {
        assert_eq!(rr_offset(12.0, 0.0), 0.0);
        assert!(rr_offset(1.0, 100.0).abs() <= RR_WARP_SCALE);
    }

    #[test]
    fn test_phase_and_index() {
        let beat = beat_context(Some(LeadId::II), 2.0, 75.0, &quiet(), true);
        assert_eq!(beat.index, 2);
        assert!((beat.phase - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_time_wraps_into_cycle() {
        let beat = beat_context(Some(LeadId::II), -0.2, 75.0, &quiet(), true);
        assert!((0.0..1.0).contains(&beat.phase));
        assert_eq!(beat.index, -1);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let params = quiet();
        let mut synth = WaveformSynthesizer::new(NullNoise);
        for hr in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let v = synth.sample(LeadId::II, 0.27, Pathology::Normal, hr, &params);
            let expected = synth.sample(LeadId::II, 0.27, Pathology::Normal, FALLBACK_HR, &params);
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn test_periodic_without_variability() {
        let params = quiet();
        let mut synth = WaveformSynthesizer::new(NullNoise);
        for i in 0..50 {
            let t = i as f64 * 0.016;
            let a = synth.sample(LeadId::V4, t, Pathology::Normal, 75.0, &params);
            let b = synth.sample(LeadId::V4, t + 0.8, Pathology::Normal, 75.0, &params);
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_height_scales_linearly() {
        let base = quiet();
        let double = GlobalParameters {
            wave_height: 200.0,
            ..base
        };
        let mut synth = WaveformSynthesizer::new(NullNoise);
        let a = synth.sample(LeadId::II, 0.27, Pathology::Normal, 75.0, &base);
        let b = synth.sample(LeadId::II, 0.27, Pathology::Normal, 75.0, &double);
        assert!((b - 2.0 * a).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_keys_degrade() {
        let params = quiet();
        let mut synth = WaveformSynthesizer::new(NullNoise);
        let unknown = synth.sample_keyed("II", 0.27, "torsades", 75.0, &params);
        let normal = synth.sample(LeadId::II, 0.27, Pathology::Normal, 75.0, &params);
        assert_eq!(unknown, normal);

        let v = synth.sample_keyed("V9", 0.27, "normal", 75.0, &params);
        assert!(v.is_finite());
    }

    #[test]
    fn test_generic_r_descent_only_for_unknown_keys() {
        let params = GlobalParameters {
            r_descent: 80.0,
            ..quiet()
        };
        let mut synth = WaveformSynthesizer::new(NullNoise);
        // Inside the reshaping window and on a nonzero value.
        let t = 0.25 * 0.8;
        let known = synth.sample_keyed("II", t, "normal", 75.0, &params);
        let unknown = synth.sample_keyed("II", t, "unknown", 75.0, &params);
        if known != 0.0 {
            assert_ne!(known, unknown);
        }
    }

    #[test]
    fn test_generic_st_shift_skipped_for_vfib() {
        let flat = quiet();
        let raised = GlobalParameters {
            st_elevation: 60.0,
            ..flat
        };
        let mut synth = WaveformSynthesizer::new(NullNoise);
        let t = 0.4 * 0.8;
        assert_eq!(
            synth.sample(LeadId::II, t, Pathology::Vfib, 75.0, &flat),
            synth.sample(LeadId::II, t, Pathology::Vfib, 75.0, &raised)
        );
        assert_ne!(
            synth.sample(LeadId::II, t, Pathology::Normal, 75.0, &flat),
            synth.sample(LeadId::II, t, Pathology::Normal, 75.0, &raised)
        );
    }

    #[test]
    fn test_clean_signal_draws_no_noise() {
        let mut synth = WaveformSynthesizer::new(SeededNoise::new(9));
        for i in 0..100 {
            synth.sample(LeadId::V5, i as f64 * 0.01, Pathology::Afib, 110.0, &quiet());
        }
        assert_eq!(synth.noise().draws(), 0);

        let noisy = GlobalParameters {
            artifact_level: 50.0,
            ..quiet()
        };
        synth.sample(LeadId::V5, 0.5, Pathology::Afib, 110.0, &noisy);
        assert!(synth.noise().draws() >= 3);
        assert_eq!(synth.noise().seed(), 9);
    }

    #[test]
    fn test_all_pathologies_finite() {
        let mut synth = WaveformSynthesizer::new(SeededNoise::new(3));
        let params = GlobalParameters::default();
        for pathology in Pathology::ALL {
            for lead in LeadId::ALL {
                for i in 0..40 {
                    let t = i as f64 * 0.037;
                    let v = synth.sample(lead, t, pathology, 75.0, &params);
                    assert!(v.is_finite(), "{pathology} {lead} at {t}");
                }
            }
        }
    }
}
