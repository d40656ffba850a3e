//! Parameter store: global parameters plus per-lead overrides.
//!
//! The store is an immutable value. Every transition consumes the current
//! state and returns the next one, so the owner (usually
//! [`crate::render::Simulator`]) holds the only mutable reference.

use crate::catalog;
use crate::types::{
    GlobalParameters, LeadId, LeadOverride, LeadOverrideMap, LeadSelection, Param, Pathology,
};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global parameters and the per-lead override map.
///
/// # Example
///
/// ```rust
/// use ekgsim::prelude::*;
///
/// let store = ParameterStore::new()
///     .set_param(Param::RWaveAmp, 180.0, LeadSelection::Lead(LeadId::V2));
///
/// assert_eq!(store.resolve(Param::RWaveAmp, LeadId::V2), 180.0);
/// assert_eq!(store.resolve(Param::RWaveAmp, LeadId::V3), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParameterStore {
    globals: GlobalParameters,
    overrides: LeadOverrideMap,
}

impl ParameterStore {
    /// Creates a store holding factory defaults and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `kind`'s preset already applied.
    pub fn from_preset(kind: Pathology) -> Self {
        Self::new().apply_preset(kind)
    }

    /// Returns the global parameter record.
    pub fn globals(&self) -> &GlobalParameters {
        &self.globals
    }

    /// Returns the per-lead override map.
    pub fn overrides(&self) -> &LeadOverrideMap {
        &self.overrides
    }

    /// Returns `lead`'s override entry, if it has one.
    pub fn override_for(&self, lead: LeadId) -> Option<&LeadOverride> {
        self.overrides.get(&lead)
    }

    /// Returns the effective value of `param` for `lead`.
    ///
    /// A lead override always wins over the global value.
    pub fn resolve(&self, param: Param, lead: LeadId) -> f64 {
        self.overrides
            .get(&lead)
            .and_then(|entry| entry.get(param))
            .unwrap_or_else(|| self.globals.get(param))
    }

    /// Returns the full resolved parameter record for `lead`.
    pub fn resolved(&self, lead: LeadId) -> GlobalParameters {
        match self.overrides.get(&lead) {
            Some(entry) => entry.apply_to(&self.globals),
            None => self.globals,
        }
    }

    /// Writes one parameter value.
    ///
    /// With [`LeadSelection::All`] the global value is written. With a lead
    /// selected the value is merged into that lead's override entry, unless
    /// the parameter is global-only, in which case the global is written.
    /// Values are stored as given, without clamping.
    #[must_use]
    pub fn set_param(mut self, param: Param, value: f64, selection: LeadSelection) -> Self {
        match selection {
            LeadSelection::Lead(lead) if param.is_per_lead() => {
                self.overrides.entry(lead).or_default().insert(param, value);
            }
            _ => self.globals.set(param, value),
        }
        self
    }

    /// Removes every override for the selected lead. No-op for
    /// [`LeadSelection::All`].
    #[must_use]
    pub fn clear_overrides(mut self, selection: LeadSelection) -> Self {
        if let LeadSelection::Lead(lead) = selection {
            if self.overrides.remove(&lead).is_some() {
                debug!(lead = %lead, "cleared lead overrides");
            }
        }
        self
    }

    /// Replaces the whole state with `kind`'s preset.
    ///
    /// Globals become factory defaults overlaid with the preset's declared
    /// values, and the override map becomes exactly the preset's map.
    #[must_use]
    pub fn apply_preset(self, kind: Pathology) -> Self {
        let preset = catalog::preset(kind);
        let next = Self {
            globals: preset.globals(),
            overrides: preset.overrides(),
        };
        debug!(
            pathology = %kind,
            overridden_leads = next.overrides.len(),
            "applied preset"
        );
        next
    }

    /// Restores factory defaults and clears every override.
    #[must_use]
    pub fn reset_all(self) -> Self {
        debug!("reset all parameters");
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_precedence() {
        let store = ParameterStore::new()
            .set_param(Param::TWaveAmp, 50.0, LeadSelection::All)
            .set_param(Param::TWaveAmp, 200.0, LeadSelection::Lead(LeadId::V3));

        assert_eq!(store.resolve(Param::TWaveAmp, LeadId::V3), 200.0);
        assert_eq!(store.resolve(Param::TWaveAmp, LeadId::V4), 50.0);
        assert_eq!(store.resolved(LeadId::V3).t_wave_amp, 200.0);
        assert_eq!(store.globals().t_wave_amp, 50.0);
    }

    #[test]
    fn test_no_clamping() {
        let store = ParameterStore::new().set_param(Param::HeartRate, 400.0, LeadSelection::All);
        assert_eq!(store.globals().heart_rate, 400.0);
    }

    #[test]
    fn test_timing_param_with_lead_writes_global() {
        let store =
            ParameterStore::new().set_param(Param::QtInterval, 150.0, LeadSelection::Lead(LeadId::II));
        assert_eq!(store.globals().qt_interval, 150.0);
        assert!(store.override_for(LeadId::II).is_none());
    }

    #[test]
    fn test_clear_overrides() {
        let store = ParameterStore::new()
            .set_param(Param::RWaveAmp, 10.0, LeadSelection::Lead(LeadId::I))
            .set_param(Param::RWaveAmp, 20.0, LeadSelection::Lead(LeadId::II));

        let all = store.clone().clear_overrides(LeadSelection::All);
        assert_eq!(all, store);

        let cleared = store.clear_overrides(LeadSelection::Lead(LeadId::I));
        assert!(cleared.override_for(LeadId::I).is_none());
        assert_eq!(cleared.resolve(Param::RWaveAmp, LeadId::II), 20.0);
    }

    #[test]
    fn test_apply_preset_replaces_state() {
        let edited = ParameterStore::new()
            .set_param(Param::PrInterval, 220.0, LeadSelection::All)
            .set_param(Param::SWaveAmp, 5.0, LeadSelection::Lead(LeadId::V1));

        let store = edited.apply_preset(Pathology::LongQt);
        assert_eq!(store.globals().qt_interval, 140.0);
        assert_eq!(store.globals().pr_interval, 100.0);
        assert!(store.overrides().is_empty());

        let store = store.apply_preset(Pathology::Hyperkalemia);
        assert_eq!(store.globals().qt_interval, 100.0);
        assert_eq!(store.overrides().len(), 12);
        assert_eq!(store.resolve(Param::WaveHeight, LeadId::II), 190.0);
    }

    #[test]
    fn test_apply_normal_is_idempotent() {
        let once = ParameterStore::new()
            .set_param(Param::StElevation, 40.0, LeadSelection::All)
            .apply_preset(Pathology::Normal);
        let twice = once.clone().apply_preset(Pathology::Normal);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reset_all() {
        let store = ParameterStore::from_preset(Pathology::Hyperkalemia)
            .set_param(Param::HeartRate, 130.0, LeadSelection::All)
            .reset_all();
        assert_eq!(store, ParameterStore::new());
    }
}
