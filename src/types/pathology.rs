//! The closed set of simulated rhythms and morphologies.

use crate::error::{EkgError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A simulated rhythm, conduction disturbance or morphology.
///
/// Variants are mutually exclusive: exactly one pathology drives the
/// synthesizer at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pathology {
    /// Normal sinus rhythm.
    #[default]
    Normal,
    /// Sinus bradycardia.
    SinusBrady,
    /// Sinus tachycardia.
    SinusTachy,
    /// Atrial fibrillation.
    Afib,
    /// Atrial flutter.
    Aflutter,
    /// AV nodal re-entrant tachycardia.
    Svt,
    /// Monomorphic ventricular tachycardia.
    Vtach,
    /// Ventricular fibrillation.
    Vfib,
    /// Asystole.
    Asystole,
    /// First-degree AV block.
    FirstDegree,
    /// Second-degree AV block, Mobitz I (Wenckebach).
    Mobitz1,
    /// Second-degree AV block, Mobitz II.
    Mobitz2,
    /// Complete heart block.
    ThirdDegree,
    /// Right bundle branch block.
    Rbbb,
    /// Left bundle branch block.
    Lbbb,
    /// Anterior ST-elevation infarct.
    AnteriorStemi,
    /// Inferior ST-elevation infarct.
    InferiorStemi,
    /// Lateral ST-elevation infarct.
    LateralStemi,
    /// Posterior infarct.
    PosteriorStemi,
    /// Hyperkalemia.
    Hyperkalemia,
    /// Hypokalemia.
    Hypokalemia,
    /// Pulmonary embolism.
    Pe,
    /// Acute pericarditis.
    Pericarditis,
    /// Wolff-Parkinson-White pre-excitation.
    Wpw,
    /// Long QT syndrome.
    LongQt,
    /// Cardiac tamponade.
    Tamponade,
    /// Lown-Ganong-Levine pre-excitation.
    Lgl,
    /// Benign early repolarization.
    EarlyRepol,
    /// Left arm / right arm electrode reversal.
    LaRaReversal,
    /// Left arm / left leg electrode reversal.
    LaLlReversal,
    /// Right arm / left leg electrode reversal.
    RaLlReversal,
    /// V1 / V2 electrode reversal.
    PrecordialReversal,
}

impl Pathology {
    /// Every pathology, in catalog order.
    pub const ALL: [Pathology; 32] = [
        Pathology::Normal,
        Pathology::SinusBrady,
        Pathology::SinusTachy,
        Pathology::Afib,
        Pathology::Aflutter,
        Pathology::Svt,
        Pathology::Vtach,
        Pathology::Vfib,
        Pathology::Asystole,
        Pathology::FirstDegree,
        Pathology::Mobitz1,
        Pathology::Mobitz2,
        Pathology::ThirdDegree,
        Pathology::Rbbb,
        Pathology::Lbbb,
        Pathology::AnteriorStemi,
        Pathology::InferiorStemi,
        Pathology::LateralStemi,
        Pathology::PosteriorStemi,
        Pathology::Hyperkalemia,
        Pathology::Hypokalemia,
        Pathology::Pe,
        Pathology::Pericarditis,
        Pathology::Wpw,
        Pathology::LongQt,
        Pathology::Tamponade,
        Pathology::Lgl,
        Pathology::EarlyRepol,
        Pathology::LaRaReversal,
        Pathology::LaLlReversal,
        Pathology::RaLlReversal,
        Pathology::PrecordialReversal,
    ];

    /// Returns the stable string key for this pathology.
    pub fn key(self) -> &'static str {
        match self {
            Pathology::Normal => "normal",
            Pathology::SinusBrady => "sinus_brady",
            Pathology::SinusTachy => "sinus_tachy",
            Pathology::Afib => "afib",
            Pathology::Aflutter => "aflutter",
            Pathology::Svt => "svt",
            Pathology::Vtach => "vtach",
            Pathology::Vfib => "vfib",
            Pathology::Asystole => "asystole",
            Pathology::FirstDegree => "first_degree",
            Pathology::Mobitz1 => "mobitz1",
            Pathology::Mobitz2 => "mobitz2",
            Pathology::ThirdDegree => "third_degree",
            Pathology::Rbbb => "rbbb",
            Pathology::Lbbb => "lbbb",
            Pathology::AnteriorStemi => "anterior_stemi",
            Pathology::InferiorStemi => "inferior_stemi",
            Pathology::LateralStemi => "lateral_stemi",
            Pathology::PosteriorStemi => "posterior_stemi",
            Pathology::Hyperkalemia => "hyperkalemia",
            Pathology::Hypokalemia => "hypokalemia",
            Pathology::Pe => "pe",
            Pathology::Pericarditis => "pericarditis",
            Pathology::Wpw => "wpw",
            Pathology::LongQt => "long_qt",
            Pathology::Tamponade => "tamponade",
            Pathology::Lgl => "lgl",
            Pathology::EarlyRepol => "early_repol",
            Pathology::LaRaReversal => "la_ra_reversal",
            Pathology::LaLlReversal => "la_ll_reversal",
            Pathology::RaLlReversal => "ra_ll_reversal",
            Pathology::PrecordialReversal => "precordial_reversal",
        }
    }

    /// Looks up a pathology by its key, returning `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Pathology::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Returns false for rhythms with no organized electrical activity.
    ///
    /// Beat variability, RR time warping and ST post-processing are all
    /// disabled for these.
    pub fn has_organized_activity(self) -> bool {
        !matches!(self, Pathology::Vfib | Pathology::Asystole)
    }

    /// Returns true for the four simulated electrode reversals.
    pub fn is_lead_reversal(self) -> bool {
        matches!(
            self,
            Pathology::LaRaReversal
                | Pathology::LaLlReversal
                | Pathology::RaLlReversal
                | Pathology::PrecordialReversal
        )
    }
}

impl fmt::Display for Pathology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Pathology {
    type Err = EkgError;

    fn from_str(s: &str) -> Result<Self> {
        Pathology::from_key(s).ok_or_else(|| EkgError::UnknownPathology(s.to_string()))
    }
}
