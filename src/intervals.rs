//! Effective heart rate and clinical interval calculation.

use crate::types::{Bpm, Degrees, GlobalParameters, Millis, Pathology};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nominal PR interval at 100% scale (ms).
pub const BASE_PR_MS: f64 = 160.0;
/// Nominal QRS duration at 100% scale (ms).
pub const BASE_QRS_MS: f64 = 90.0;
/// QT at 60 bpm and 100% scale (ms), before Bazett rate scaling.
pub const BASE_QT_MS: f64 = 400.0;
/// Nominal electrical axis (degrees).
pub const NORMAL_AXIS: Degrees = 60;

/// Rate used in place of a non-positive or non-finite rate.
pub const FALLBACK_HR: Bpm = 75.0;

/// Returns `hr`, or [`FALLBACK_HR`] when `hr` is not a positive finite rate.
#[inline]
pub fn usable_hr(hr: Bpm) -> Bpm {
    if hr.is_finite() && hr > 0.0 {
        hr
    } else {
        FALLBACK_HR
    }
}

/// Clamps `requested` into the band valid for `pathology`.
///
/// Pathologies without a rate rule pass the requested rate through. A
/// non-positive or non-finite request is replaced by [`FALLBACK_HR`] first,
/// the same rate the synthesizer draws with.
pub fn effective_hr(pathology: Pathology, requested: Bpm) -> Bpm {
    let requested = usable_hr(requested);
    match pathology {
        Pathology::SinusBrady => requested.min(59.0),
        Pathology::SinusTachy => requested.max(101.0),
        Pathology::Aflutter => requested.clamp(75.0, 150.0),
        Pathology::Svt => requested.clamp(150.0, 250.0),
        Pathology::Vtach => requested.clamp(100.0, 250.0),
        Pathology::ThirdDegree => requested.clamp(20.0, 60.0),
        Pathology::Pe => requested.clamp(100.0, 150.0),
        Pathology::Tamponade => requested.clamp(100.0, 140.0),
        _ => requested,
    }
}

/// Bazett-scaled QT for `hr` before any scale factor (ms).
#[inline]
pub fn bazett_qt_ms(hr: Bpm) -> f64 {
    BASE_QT_MS * (60.0 / hr).sqrt()
}

/// Displayed clinical intervals. `None` means "not defined" for the
/// pathology, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntervalSet {
    /// PR interval (ms).
    pub pr: Option<Millis>,
    /// QRS duration (ms).
    pub qrs: Option<Millis>,
    /// QT interval (ms).
    pub qt: Option<Millis>,
    /// Bazett-corrected QT (ms).
    pub qtc: Option<Millis>,
    /// Electrical axis (degrees).
    pub axis: Option<Degrees>,
}

impl IntervalSet {
    /// An interval set with every field undefined.
    pub const UNDEFINED: IntervalSet = IntervalSet {
        pr: None,
        qrs: None,
        qt: None,
        qtc: None,
        axis: None,
    };
}

fn ms(value: f64) -> Millis {
    value.round().max(0.0) as u32
}

fn fmt_ms(value: Option<Millis>) -> String {
    value.map_or_else(|| "---".to_string(), |v| format!("{v}ms"))
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = self
            .axis
            .map_or_else(|| "---".to_string(), |a| format!("{a}°"));
        write!(
            f,
            "PR: {}  QRS: {}  QT: {}  QTc: {}  Axis: {}",
            fmt_ms(self.pr),
            fmt_ms(self.qrs),
            fmt_ms(self.qt),
            fmt_ms(self.qtc),
            axis
        )
    }
}

/// Computes the displayed intervals for `pathology` at rate `hr`.
///
/// Base values come from the global timing scales; pathology rules then
/// adjust, clamp or null individual fields. `hr` should already be the
/// effective rate.
pub fn intervals(pathology: Pathology, hr: Bpm, params: &GlobalParameters) -> IntervalSet {
    if !pathology.has_organized_activity() {
        return IntervalSet::UNDEFINED;
    }

    let hr = usable_hr(hr);
    let rr_seconds = 60.0 / hr;
    let base_pr = ms(BASE_PR_MS * params.pr_interval / 100.0);
    let base_qrs = ms(BASE_QRS_MS * params.qrs_width / 100.0);
    let base_qt = ms(BASE_QT_MS * rr_seconds.sqrt() * params.qt_interval / 100.0);

    let mut pr = Some(base_pr);
    let mut qrs = base_qrs;
    let mut qt = base_qt;
    let mut axis = NORMAL_AXIS;

    match pathology {
        Pathology::FirstDegree => pr = Some(base_pr + 80),
        Pathology::Mobitz1 => pr = Some(base_pr + 40),
        Pathology::Mobitz2 => {
            pr = Some(base_pr + 30);
            qrs = qrs.max(120);
        }
        Pathology::ThirdDegree => {
            pr = None;
            // Junctional escape keeps a narrow QRS; a ventricular focus widens it
            if hr < 40.0 {
                qrs = qrs.max(140);
                axis = -30;
            } else {
                axis = 0;
            }
        }
        Pathology::Rbbb => {
            qrs = qrs.max(120);
            axis = 60;
        }
        Pathology::Lbbb => {
            qrs = qrs.max(140);
            axis = -45;
        }
        Pathology::Wpw => {
            pr = Some(ms(f64::from(base_pr) * 0.65).clamp(70, 119));
            qrs = qrs.max(110);
        }
        Pathology::Lgl => pr = Some(ms(f64::from(base_pr) * 0.55).clamp(70, 100)),
        Pathology::Hyperkalemia => {
            pr = Some(base_pr + 15);
            qrs = qrs.max(ms(f64::from(qrs) * 1.15));
        }
        Pathology::Hypokalemia => qt = ms(f64::from(qt) * 1.2),
        Pathology::LongQt => qt = ms(f64::from(qt) * 1.35),
        Pathology::Vtach => {
            pr = None;
            qrs = qrs.max(160);
            axis = -90;
        }
        Pathology::Afib | Pathology::Aflutter | Pathology::Svt => pr = None,
        Pathology::Pe => axis = 110,
        Pathology::AnteriorStemi => axis = 45,
        Pathology::InferiorStemi => axis = 75,
        _ => {}
    }

    let qtc = (qt > 0 && hr > 0.0).then(|| ms(f64::from(qt) / rr_seconds.sqrt()));

    IntervalSet {
        pr,
        qrs: Some(qrs),
        qt: Some(qt),
        qtc,
        axis: Some(axis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> GlobalParameters {
        GlobalParameters::default()
    }

    #[test]
    fn test_normal_intervals() {
        let set = intervals(Pathology::Normal, 75.0, &defaults());
        let qt = (400.0 * 0.8f64.sqrt()).round() as u32;
        assert_eq!(set.pr, Some(160));
        assert_eq!(set.qrs, Some(90));
        assert_eq!(set.qt, Some(qt));
        assert_eq!(set.qtc, Some((qt as f64 / 0.8f64.sqrt()).round() as u32));
        assert_eq!(set.axis, Some(60));
    }

    #[test]
    fn test_zero_rate_falls_back() {
        assert_eq!(effective_hr(Pathology::Normal, 0.0), FALLBACK_HR);
        assert_eq!(effective_hr(Pathology::Normal, f64::NAN), FALLBACK_HR);
        assert_eq!(effective_hr(Pathology::SinusBrady, -5.0), 59.0);

        let at_zero = intervals(Pathology::Normal, 0.0, &defaults());
        assert_eq!(at_zero, intervals(Pathology::Normal, FALLBACK_HR, &defaults()));
        assert!(at_zero.qt.is_some_and(|qt| qt < 1000));
    }

    #[test]
    fn test_effective_hr_bands() {
        assert_eq!(effective_hr(Pathology::SinusBrady, 120.0), 59.0);
        assert_eq!(effective_hr(Pathology::SinusTachy, 60.0), 101.0);
        assert_eq!(effective_hr(Pathology::Svt, 75.0), 150.0);
        assert_eq!(effective_hr(Pathology::ThirdDegree, 90.0), 60.0);
        assert_eq!(effective_hr(Pathology::Tamponade, 200.0), 140.0);
        assert_eq!(effective_hr(Pathology::Normal, 33.0), 33.0);
    }

    #[test]
    fn test_undefined_for_chaotic_rhythms() {
        assert_eq!(intervals(Pathology::Vfib, 75.0, &defaults()), IntervalSet::UNDEFINED);
        assert_eq!(intervals(Pathology::Asystole, 75.0, &defaults()), IntervalSet::UNDEFINED);
    }

    #[test]
    fn test_block_rules() {
        let first = intervals(Pathology::FirstDegree, 75.0, &defaults());
        assert_eq!(first.pr, Some(240));

        let mobitz2 = intervals(Pathology::Mobitz2, 75.0, &defaults());
        assert_eq!(mobitz2.pr, Some(190));
        assert_eq!(mobitz2.qrs, Some(120));

        let junctional = intervals(Pathology::ThirdDegree, 50.0, &defaults());
        assert_eq!(junctional.pr, None);
        assert_eq!(junctional.qrs, Some(90));
        assert_eq!(junctional.axis, Some(0));

        let ventricular = intervals(Pathology::ThirdDegree, 30.0, &defaults());
        assert_eq!(ventricular.qrs, Some(140));
        assert_eq!(ventricular.axis, Some(-30));
    }

    #[test]
    fn test_preexcitation_pr_clamped() {
        let wpw = intervals(Pathology::Wpw, 75.0, &defaults());
        assert_eq!(wpw.pr, Some(104));
        assert_eq!(wpw.qrs, Some(110));

        let short = GlobalParameters { pr_interval: 50.0, ..defaults() };
        assert_eq!(intervals(Pathology::Wpw, 75.0, &short).pr, Some(70));
        assert_eq!(intervals(Pathology::Lgl, 75.0, &defaults()).pr, Some(88));

        let long = GlobalParameters { pr_interval: 250.0, ..defaults() };
        assert_eq!(intervals(Pathology::Lgl, 75.0, &long).pr, Some(100));
    }

    #[test]
    fn test_qt_scaling() {
        let normal = intervals(Pathology::Normal, 60.0, &defaults());
        assert_eq!(normal.qt, Some(400));
        assert_eq!(intervals(Pathology::Hypokalemia, 60.0, &defaults()).qt, Some(480));
        assert_eq!(intervals(Pathology::LongQt, 60.0, &defaults()).qt, Some(540));
    }

    #[test]
    fn test_display_placeholders() {
        let text = intervals(Pathology::Afib, 60.0, &defaults()).to_string();
        assert!(text.starts_with("PR: ---"));
        assert!(text.contains("QRS: 90ms"));
        assert_eq!(
            IntervalSet::UNDEFINED.to_string(),
            "PR: ---  QRS: ---  QT: ---  QTc: ---  Axis: ---"
        );
    }
}
