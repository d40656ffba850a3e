//! Continuous shape and timing parameters.
//!
//! Every parameter is a percentage (or signed percentage) with a declared
//! range. Ranges are advisory: the store accepts any value and consumers
//! clamp where it matters (effective heart rate, ST shift).

use crate::error::{EkgError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named simulator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Param {
    /// Requested heart rate in bpm.
    HeartRate,
    /// Artifact level (%).
    ArtifactLevel,
    /// RR variability (%).
    RrVariability,
    /// Beat-to-beat wave irregularity (%).
    WaveIrregularity,
    /// PR interval scale (% of 160 ms).
    PrInterval,
    /// QRS duration scale (% of 90 ms).
    QrsWidth,
    /// QT interval scale (% of the Bazett baseline).
    QtInterval,
    /// Overall voltage scale (%).
    WaveHeight,
    /// Visual wave width (%), does not change timing.
    WaveWidth,
    /// P wave amplitude (%).
    PWaveAmp,
    /// Q wave amplitude (%).
    QWaveAmp,
    /// R wave amplitude (%).
    RWaveAmp,
    /// S wave amplitude (%).
    SWaveAmp,
    /// T wave amplitude (%).
    TWaveAmp,
    /// ST elevation (%).
    StElevation,
    /// ST depression (%).
    StDepression,
    /// J-point takeoff smoothing (%).
    JPointCurve,
    /// ST slope, negative is downsloping (%).
    StSlope,
    /// R wave downslope ("ST concavity"), negative is steep (%).
    RDescent,
    /// T wave downslope, negative is steep (%).
    TWaveDescent,
    /// Biphasic T, negative is initial inversion (%).
    TWaveBiphasic,
}

impl Param {
    /// Every parameter, in display order.
    pub const ALL: [Param; 21] = [
        Param::HeartRate,
        Param::ArtifactLevel,
        Param::RrVariability,
        Param::WaveIrregularity,
        Param::PrInterval,
        Param::QrsWidth,
        Param::QtInterval,
        Param::WaveHeight,
        Param::WaveWidth,
        Param::PWaveAmp,
        Param::QWaveAmp,
        Param::RWaveAmp,
        Param::SWaveAmp,
        Param::TWaveAmp,
        Param::StElevation,
        Param::StDepression,
        Param::JPointCurve,
        Param::StSlope,
        Param::RDescent,
        Param::TWaveDescent,
        Param::TWaveBiphasic,
    ];

    /// Returns the snake_case name of this parameter.
    pub fn name(self) -> &'static str {
        match self {
            Param::HeartRate => "heart_rate",
            Param::ArtifactLevel => "artifact_level",
            Param::RrVariability => "rr_variability",
            Param::WaveIrregularity => "wave_irregularity",
            Param::PrInterval => "pr_interval",
            Param::QrsWidth => "qrs_width",
            Param::QtInterval => "qt_interval",
            Param::WaveHeight => "wave_height",
            Param::WaveWidth => "wave_width",
            Param::PWaveAmp => "p_wave_amp",
            Param::QWaveAmp => "q_wave_amp",
            Param::RWaveAmp => "r_wave_amp",
            Param::SWaveAmp => "s_wave_amp",
            Param::TWaveAmp => "t_wave_amp",
            Param::StElevation => "st_elevation",
            Param::StDepression => "st_depression",
            Param::JPointCurve => "j_point_curve",
            Param::StSlope => "st_slope",
            Param::RDescent => "r_descent",
            Param::TWaveDescent => "t_wave_descent",
            Param::TWaveBiphasic => "t_wave_biphasic",
        }
    }

    /// Returns the declared valid range.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Param::HeartRate => 20.0..=250.0,
            Param::ArtifactLevel | Param::RrVariability | Param::WaveIrregularity => 0.0..=100.0,
            Param::PrInterval => 50.0..=250.0,
            Param::QrsWidth => 50.0..=300.0,
            Param::QtInterval => 50.0..=200.0,
            Param::WaveHeight => 25.0..=300.0,
            Param::WaveWidth => 50.0..=200.0,
            Param::PWaveAmp
            | Param::QWaveAmp
            | Param::RWaveAmp
            | Param::SWaveAmp
            | Param::TWaveAmp
            | Param::JPointCurve => 0.0..=300.0,
            Param::StElevation | Param::StDepression => 0.0..=100.0,
            Param::StSlope | Param::RDescent | Param::TWaveDescent | Param::TWaveBiphasic => {
                -100.0..=100.0
            }
        }
    }

    /// Returns the factory default.
    pub fn default_value(self) -> f64 {
        GlobalParameters::default().get(self)
    }

    /// Returns true if the parameter may be overridden per lead.
    ///
    /// Rate, timing and the noise controls are always global.
    pub fn is_per_lead(self) -> bool {
        !matches!(
            self,
            Param::HeartRate
                | Param::ArtifactLevel
                | Param::RrVariability
                | Param::WaveIrregularity
                | Param::PrInterval
                | Param::QrsWidth
                | Param::QtInterval
        )
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = EkgError;

    fn from_str(s: &str) -> Result<Self> {
        Param::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| EkgError::UnknownParameter(s.to_string()))
    }
}

/// The full record of global parameter values.
///
/// The same record type doubles as the *resolved* parameter set for one
/// lead: globals with that lead's overrides laid on top.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalParameters {
    /// Requested heart rate in bpm.
    pub heart_rate: f64,
    /// Artifact level (%).
    pub artifact_level: f64,
    /// RR variability (%).
    pub rr_variability: f64,
    /// Wave irregularity (%).
    pub wave_irregularity: f64,
    /// PR scale (%).
    pub pr_interval: f64,
    /// QRS scale (%).
    pub qrs_width: f64,
    /// QT scale (%).
    pub qt_interval: f64,
    /// Voltage scale (%).
    pub wave_height: f64,
    /// Visual width (%).
    pub wave_width: f64,
    /// P amplitude (%).
    pub p_wave_amp: f64,
    /// Q amplitude (%).
    pub q_wave_amp: f64,
    /// R amplitude (%).
    pub r_wave_amp: f64,
    /// S amplitude (%).
    pub s_wave_amp: f64,
    /// T amplitude (%).
    pub t_wave_amp: f64,
    /// ST elevation (%).
    pub st_elevation: f64,
    /// ST depression (%).
    pub st_depression: f64,
    /// J-point curve (%).
    pub j_point_curve: f64,
    /// ST slope (%).
    pub st_slope: f64,
    /// R descent (%).
    pub r_descent: f64,
    /// T descent (%).
    pub t_wave_descent: f64,
    /// T biphasic factor (%).
    pub t_wave_biphasic: f64,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            heart_rate: 75.0,
            artifact_level: 4.0,
            rr_variability: 5.0,
            wave_irregularity: 5.0,
            pr_interval: 100.0,
            qrs_width: 100.0,
            qt_interval: 100.0,
            wave_height: 100.0,
            wave_width: 100.0,
            p_wave_amp: 100.0,
            q_wave_amp: 100.0,
            r_wave_amp: 100.0,
            s_wave_amp: 100.0,
            t_wave_amp: 100.0,
            st_elevation: 0.0,
            st_depression: 0.0,
            j_point_curve: 20.0,
            st_slope: 0.0,
            r_descent: 0.0,
            t_wave_descent: 0.0,
            t_wave_biphasic: 0.0,
        }
    }
}

impl GlobalParameters {
    /// Returns the value of one parameter.
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::HeartRate => self.heart_rate,
            Param::ArtifactLevel => self.artifact_level,
            Param::RrVariability => self.rr_variability,
            Param::WaveIrregularity => self.wave_irregularity,
            Param::PrInterval => self.pr_interval,
            Param::QrsWidth => self.qrs_width,
            Param::QtInterval => self.qt_interval,
            Param::WaveHeight => self.wave_height,
            Param::WaveWidth => self.wave_width,
            Param::PWaveAmp => self.p_wave_amp,
            Param::QWaveAmp => self.q_wave_amp,
            Param::RWaveAmp => self.r_wave_amp,
            Param::SWaveAmp => self.s_wave_amp,
            Param::TWaveAmp => self.t_wave_amp,
            Param::StElevation => self.st_elevation,
            Param::StDepression => self.st_depression,
            Param::JPointCurve => self.j_point_curve,
            Param::StSlope => self.st_slope,
            Param::RDescent => self.r_descent,
            Param::TWaveDescent => self.t_wave_descent,
            Param::TWaveBiphasic => self.t_wave_biphasic,
        }
    }

    /// Sets the value of one parameter. No clamping is applied.
    pub fn set(&mut self, param: Param, value: f64) {
        let slot = match param {
            Param::HeartRate => &mut self.heart_rate,
            Param::ArtifactLevel => &mut self.artifact_level,
            Param::RrVariability => &mut self.rr_variability,
            Param::WaveIrregularity => &mut self.wave_irregularity,
            Param::PrInterval => &mut self.pr_interval,
            Param::QrsWidth => &mut self.qrs_width,
            Param::QtInterval => &mut self.qt_interval,
            Param::WaveHeight => &mut self.wave_height,
            Param::WaveWidth => &mut self.wave_width,
            Param::PWaveAmp => &mut self.p_wave_amp,
            Param::QWaveAmp => &mut self.q_wave_amp,
            Param::RWaveAmp => &mut self.r_wave_amp,
            Param::SWaveAmp => &mut self.s_wave_amp,
            Param::TWaveAmp => &mut self.t_wave_amp,
            Param::StElevation => &mut self.st_elevation,
            Param::StDepression => &mut self.st_depression,
            Param::JPointCurve => &mut self.j_point_curve,
            Param::StSlope => &mut self.st_slope,
            Param::RDescent => &mut self.r_descent,
            Param::TWaveDescent => &mut self.t_wave_descent,
            Param::TWaveBiphasic => &mut self.t_wave_biphasic,
        };
        *slot = value;
    }

    /// Builds a record from factory defaults with `values` laid on top.
    pub fn with_values(values: &[(Param, f64)]) -> Self {
        let mut params = Self::default();
        for &(param, value) in values {
            params.set(param, value);
        }
        params
    }

    /// Net ST shift, `(elevation - depression) / 100`, clamped to [-1, 1].
    pub fn st_shift(&self) -> f64 {
        ((self.st_elevation - self.st_depression) / 100.0).clamp(-1.0, 1.0)
    }
}

/// A sparse per-lead override entry.
///
/// Only parameters for which [`Param::is_per_lead`] holds can be stored.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LeadOverride {
    values: BTreeMap<Param, f64>,
}

impl LeadOverride {
    /// Creates an empty override entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an entry from a list of values, skipping global-only params.
    pub fn from_values(values: &[(Param, f64)]) -> Self {
        let mut entry = Self::new();
        for &(param, value) in values {
            entry.insert(param, value);
        }
        entry
    }

    /// Returns the overridden value for `param`, if any.
    pub fn get(&self, param: Param) -> Option<f64> {
        self.values.get(&param).copied()
    }

    /// Stores an override. Returns false, storing nothing, for a
    /// global-only parameter.
    pub fn insert(&mut self, param: Param, value: f64) -> bool {
        if !param.is_per_lead() {
            return false;
        }
        self.values.insert(param, value);
        true
    }

    /// Returns true if no values are overridden.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of overridden values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the overridden values.
    pub fn iter(&self) -> impl Iterator<Item = (Param, f64)> + '_ {
        self.values.iter().map(|(&p, &v)| (p, v))
    }

    /// Lays this entry on top of `globals`.
    pub fn apply_to(&self, globals: &GlobalParameters) -> GlobalParameters {
        let mut resolved = *globals;
        for (param, value) in self.iter() {
            resolved.set(param, value);
        }
        resolved
    }
}

/// Per-lead overrides keyed by lead.
pub type LeadOverrideMap = BTreeMap<super::LeadId, LeadOverride>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_cover_every_param() {
        let mut params = GlobalParameters::default();
        for (i, param) in Param::ALL.iter().enumerate() {
            params.set(*param, i as f64 + 0.5);
        }
        for (i, param) in Param::ALL.iter().enumerate() {
            assert_eq!(params.get(*param), i as f64 + 0.5);
        }
    }

    #[test]
    fn test_defaults_inside_ranges() {
        for param in Param::ALL {
            assert!(
                param.range().contains(&param.default_value()),
                "{param} default outside range"
            );
        }
    }

    #[test]
    fn test_param_names_round_trip() {
        for param in Param::ALL {
            assert_eq!(param.name().parse::<Param>().unwrap(), param);
        }
        assert!("st_concavity".parse::<Param>().is_err());
    }

    #[test]
    fn test_timing_is_never_per_lead() {
        let mut entry = LeadOverride::new();
        assert!(!entry.insert(Param::QtInterval, 150.0));
        assert!(!entry.insert(Param::HeartRate, 150.0));
        assert!(entry.insert(Param::RWaveAmp, 150.0));
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.get(Param::RWaveAmp), Some(150.0));
    }

    #[test]
    fn test_st_shift_clamped() {
        let params = GlobalParameters::with_values(&[
            (Param::StElevation, 250.0),
            (Param::StDepression, 0.0),
        ]);
        assert_eq!(params.st_shift(), 1.0);

        let params = GlobalParameters::with_values(&[(Param::StDepression, 40.0)]);
        assert!((params.st_shift() + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_override_apply() {
        let globals = GlobalParameters::default();
        let entry = LeadOverride::from_values(&[(Param::TWaveAmp, 40.0), (Param::PrInterval, 200.0)]);
        let resolved = entry.apply_to(&globals);
        assert_eq!(resolved.t_wave_amp, 40.0);
        assert_eq!(resolved.pr_interval, 100.0);
    }
}
