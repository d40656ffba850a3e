//! The redraw driver: owns the mutable simulator state and evaluates the
//! 12-lead grid plus the rhythm strip.
//!
//! Every state change goes through an immutable [`ParameterStore`]
//! transition; the driver only swaps in the returned value.

use crate::catalog;
use crate::intervals::{effective_hr, intervals, IntervalSet};
use crate::noise::NoiseSource;
use crate::store::ParameterStore;
use crate::synthesis::WaveformSynthesizer;
use crate::types::{Bpm, LeadId, LeadSelection, Param, Pathology, Voltage};
use std::fmt;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard 3x4 display grid, row by row.
pub const GRID: [[LeadId; 4]; 3] = [
    [LeadId::I, LeadId::AVR, LeadId::V1, LeadId::V4],
    [LeadId::II, LeadId::AVL, LeadId::V2, LeadId::V5],
    [LeadId::III, LeadId::AVF, LeadId::V3, LeadId::V6],
];

/// Sampling layout for one redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayLayout {
    /// Duration of each grid strip (s).
    pub strip_seconds: f64,
    /// Samples per grid strip.
    pub strip_samples: usize,
    /// Lead shown on the rhythm strip.
    pub rhythm_lead: LeadId,
    /// Duration of the rhythm strip (s).
    pub rhythm_seconds: f64,
    /// Samples on the rhythm strip.
    pub rhythm_samples: usize,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self {
            strip_seconds: 2.5,
            strip_samples: 250,
            rhythm_lead: LeadId::II,
            rhythm_seconds: 10.0,
            rhythm_samples: 1000,
        }
    }
}

/// One evaluated lead trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeadStrip {
    /// The lead.
    pub lead: LeadId,
    /// Sample interval (s).
    pub dt: f64,
    /// Voltages (mV).
    pub samples: Vec<Voltage>,
}

impl LeadStrip {
    /// Sample times, `i * dt`.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples.len()).map(move |i| i as f64 * self.dt)
    }

    /// Largest absolute voltage on the strip.
    pub fn peak(&self) -> Voltage {
        self.samples.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

/// Rate and intervals shown above the trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderSummary {
    /// Display name of the pathology.
    pub name: String,
    /// Effective heart rate.
    pub hr: Bpm,
    /// RR interval (ms).
    pub rr_ms: u32,
    /// Clinical intervals.
    pub intervals: IntervalSet,
}

impl fmt::Display for HeaderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  HR: {} bpm  RR: {}ms  {}",
            self.name,
            self.hr.round(),
            self.rr_ms,
            self.intervals
        )
    }
}

/// The result of one redraw.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Redraw {
    /// Header text values.
    pub header: HeaderSummary,
    /// The twelve grid strips in [`GRID`] row order.
    pub strips: Vec<LeadStrip>,
    /// The long rhythm strip.
    pub rhythm: LeadStrip,
}

impl Redraw {
    /// Returns the grid strip for `lead`.
    pub fn strip(&self, lead: LeadId) -> Option<&LeadStrip> {
        self.strips.iter().find(|s| s.lead == lead)
    }
}

/// Simulator state plus the synthesizer that renders it.
#[derive(Debug, Clone)]
pub struct Simulator<N: NoiseSource> {
    pathology: Pathology,
    store: ParameterStore,
    synth: WaveformSynthesizer<N>,
}

impl<N: NoiseSource> Simulator<N> {
    /// Creates a simulator showing a normal rhythm with factory parameters.
    pub fn new(noise: N) -> Self {
        Self::with_state(Pathology::Normal, ParameterStore::new(), noise)
    }

    /// Creates a simulator from an existing state.
    pub fn with_state(pathology: Pathology, store: ParameterStore, noise: N) -> Self {
        Self {
            pathology,
            store,
            synth: WaveformSynthesizer::new(noise),
        }
    }

    /// Currently selected pathology.
    pub fn pathology(&self) -> Pathology {
        self.pathology
    }

    /// Current parameter store.
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Selects `pathology` and replaces the parameters with its preset.
    pub fn select_pathology(&mut self, pathology: Pathology) {
        debug!(pathology = %pathology, "selecting pathology");
        self.pathology = pathology;
        self.store = std::mem::take(&mut self.store).apply_preset(pathology);
    }

    /// Sets one parameter for all leads or one lead.
    pub fn set_param(&mut self, param: Param, value: f64, selection: LeadSelection) {
        self.store = std::mem::take(&mut self.store).set_param(param, value, selection);
    }

    /// Clears overrides for one lead or all leads.
    pub fn clear_overrides(&mut self, selection: LeadSelection) {
        self.store = std::mem::take(&mut self.store).clear_overrides(selection);
    }

    /// Restores factory parameters. The pathology is kept.
    pub fn reset_all(&mut self) {
        self.store = std::mem::take(&mut self.store).reset_all();
    }

    /// Heart rate after the pathology's rate band is applied.
    pub fn effective_hr(&self) -> Bpm {
        effective_hr(self.pathology, self.store.globals().heart_rate)
    }

    /// Displayed intervals at the effective rate.
    pub fn intervals(&self) -> IntervalSet {
        intervals(self.pathology, self.effective_hr(), self.store.globals())
    }

    /// Header values for the current state.
    pub fn header(&self) -> HeaderSummary {
        let hr = self.effective_hr();
        let rr_ms = if hr > 0.0 {
            (60_000.0 / hr).round() as u32
        } else {
            0
        };
        HeaderSummary {
            name: catalog::preset(self.pathology).display_name.to_string(),
            hr,
            rr_ms,
            intervals: self.intervals(),
        }
    }

    /// One sample of `lead` at time `t` with the lead's resolved parameters.
    pub fn sample(&mut self, lead: LeadId, t: f64) -> Voltage {
        let hr = self.effective_hr();
        let params = self.store.resolved(lead);
        self.synth.sample(lead, t, self.pathology, hr, &params)
    }

    /// Evaluates `samples` points of `lead` over `seconds`.
    pub fn strip(&mut self, lead: LeadId, seconds: f64, samples: usize) -> LeadStrip {
        let hr = self.effective_hr();
        let params = self.store.resolved(lead);
        let dt = if samples > 0 {
            seconds / samples as f64
        } else {
            0.0
        };
        let values = (0..samples)
            .map(|i| {
                self.synth
                    .sample(lead, i as f64 * dt, self.pathology, hr, &params)
            })
            .collect();
        trace!(lead = %lead, samples, "evaluated strip");
        LeadStrip {
            lead,
            dt,
            samples: values,
        }
    }

    /// Evaluates the full grid and the rhythm strip.
    pub fn redraw(&mut self, layout: &DisplayLayout) -> Redraw {
        let header = self.header();
        let strips = GRID
            .iter()
            .flatten()
            .map(|&lead| self.strip(lead, layout.strip_seconds, layout.strip_samples))
            .collect();
        let rhythm = self.strip(
            layout.rhythm_lead,
            layout.rhythm_seconds,
            layout.rhythm_samples,
        );
        debug!(
            pathology = %self.pathology,
            hr = header.hr,
            strips = GRID.len() * GRID[0].len(),
            "redraw complete"
        );
        Redraw {
            header,
            strips,
            rhythm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NullNoise, SeededNoise};

    fn quiet_simulator(pathology: Pathology) -> Simulator<NullNoise> {
        let mut sim = Simulator::new(NullNoise);
        sim.select_pathology(pathology);
        sim.set_param(Param::ArtifactLevel, 0.0, LeadSelection::All);
        sim.set_param(Param::RrVariability, 0.0, LeadSelection::All);
        sim.set_param(Param::WaveIrregularity, 0.0, LeadSelection::All);
        sim
    }

    #[test]
    fn test_redraw_shape() {
        let mut sim = quiet_simulator(Pathology::Normal);
        let layout = DisplayLayout::default();
        let redraw = sim.redraw(&layout);
        assert_eq!(redraw.strips.len(), 12);
        assert!(redraw.strips.iter().all(|s| s.samples.len() == 250));
        assert_eq!(redraw.rhythm.samples.len(), 1000);
        assert_eq!(redraw.rhythm.lead, LeadId::II);
        assert_eq!(redraw.strips[0].lead, LeadId::I);
        assert_eq!(redraw.strips[4].lead, LeadId::II);
        assert!((redraw.strips[0].dt - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_header_values() {
        let sim = quiet_simulator(Pathology::Normal);
        let header = sim.header();
        assert_eq!(header.hr, 75.0);
        assert_eq!(header.rr_ms, 800);
        let text = header.to_string();
        assert!(text.contains("RR: 800ms"));
        assert!(text.contains("PR: 160ms"));
    }

    #[test]
    fn test_header_zero_rate_matches_trace_rate() {
        let mut sim = quiet_simulator(Pathology::Normal);
        sim.set_param(Param::HeartRate, 0.0, LeadSelection::All);
        let header = sim.header();
        assert_eq!(header.hr, 75.0);
        assert_eq!(header.rr_ms, 800);
        assert!(!header.to_string().contains("4294967295"));
    }

    #[test]
    fn test_header_undefined_for_asystole() {
        let sim = quiet_simulator(Pathology::Asystole);
        assert!(sim.header().to_string().contains("PR: ---"));
    }

    #[test]
    fn test_select_pathology_applies_preset() {
        let mut sim = Simulator::new(NullNoise);
        sim.select_pathology(Pathology::Hyperkalemia);
        assert_eq!(sim.pathology(), Pathology::Hyperkalemia);
        assert_eq!(sim.store(), &ParameterStore::from_preset(Pathology::Hyperkalemia));
    }

    #[test]
    fn test_effective_hr_band() {
        let mut sim = quiet_simulator(Pathology::Svt);
        sim.set_param(Param::HeartRate, 90.0, LeadSelection::All);
        assert_eq!(sim.effective_hr(), 150.0);
    }

    #[test]
    fn test_lead_override_reaches_samples() {
        let mut sim = quiet_simulator(Pathology::Normal);
        let before = sim.strip(LeadId::V2, 2.5, 250).peak();
        sim.set_param(Param::WaveHeight, 200.0, LeadSelection::Lead(LeadId::V2));
        let after = sim.strip(LeadId::V2, 2.5, 250).peak();
        assert!((after - 2.0 * before).abs() < 1e-9);

        sim.clear_overrides(LeadSelection::Lead(LeadId::V2));
        let cleared = sim.strip(LeadId::V2, 2.5, 250).peak();
        assert!((cleared - before).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_redraw_reproducible() {
        let mut a = Simulator::new(SeededNoise::new(5));
        let mut b = Simulator::new(SeededNoise::new(5));
        a.select_pathology(Pathology::Afib);
        b.select_pathology(Pathology::Afib);
        let layout = DisplayLayout::default();
        assert_eq!(a.redraw(&layout), b.redraw(&layout));
    }

    #[test]
    fn test_strip_times() {
        let mut sim = quiet_simulator(Pathology::Normal);
        let strip = sim.strip(LeadId::V1, 2.0, 8);
        let times: Vec<f64> = strip.times().collect();
        assert_eq!(times.len(), 8);
        assert_eq!(times[0], 0.0);
        assert!((times[7] - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_strip() {
        let mut sim = quiet_simulator(Pathology::Normal);
        let strip = sim.strip(LeadId::I, 2.5, 0);
        assert!(strip.samples.is_empty());
        assert_eq!(strip.peak(), 0.0);
    }
}
