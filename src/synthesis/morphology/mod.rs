//! Per-pathology waveform strategies.
//!
//! Every pathology maps to one pure function of the beat context. Adding a
//! pathology means adding a variant and one arm in [`morphology`].

mod blocks;
mod bundle;
mod electrolyte;
mod infarct;
mod preexcitation;
mod repolarization;
mod reversal;
mod rhythm;
mod structural;

pub use reversal::{la_ll_vector, la_ra_vector, precordial_vector, ra_ll_vector};

use super::template::Beat;
use crate::types::Pathology;

/// A waveform strategy: the clean voltage of one beat sample, before the
/// generic ST shaping, variability and height scaling.
pub type Morphology = fn(&Beat) -> f64;

/// Returns the strategy for `pathology`.
pub fn morphology(pathology: Pathology) -> Morphology {
    match pathology {
        Pathology::Normal | Pathology::SinusBrady | Pathology::SinusTachy => rhythm::sinus,
        Pathology::Afib => rhythm::afib,
        Pathology::Aflutter => rhythm::aflutter,
        Pathology::Svt => rhythm::svt,
        Pathology::Vtach => rhythm::vtach,
        Pathology::Vfib => rhythm::vfib,
        Pathology::Asystole => rhythm::asystole,
        Pathology::FirstDegree => blocks::first_degree,
        Pathology::Mobitz1 => blocks::mobitz1,
        Pathology::Mobitz2 => blocks::mobitz2,
        Pathology::ThirdDegree => blocks::third_degree,
        Pathology::Rbbb => bundle::rbbb,
        Pathology::Lbbb => bundle::lbbb,
        Pathology::AnteriorStemi => infarct::anterior,
        Pathology::InferiorStemi => infarct::inferior,
        Pathology::LateralStemi => infarct::lateral,
        Pathology::PosteriorStemi => infarct::posterior,
        Pathology::Hyperkalemia => electrolyte::hyperkalemia,
        Pathology::Hypokalemia => electrolyte::hypokalemia,
        Pathology::Pe => structural::pe,
        Pathology::Pericarditis => repolarization::pericarditis,
        Pathology::Wpw => preexcitation::wpw,
        Pathology::LongQt => repolarization::long_qt,
        Pathology::Tamponade => structural::tamponade,
        Pathology::Lgl => preexcitation::lgl,
        Pathology::EarlyRepol => repolarization::early_repol,
        Pathology::LaRaReversal => reversal::la_ra,
        Pathology::LaLlReversal => reversal::la_ll,
        Pathology::RaLlReversal => reversal::ra_ll,
        Pathology::PrecordialReversal => reversal::precordial,
    }
}

/// Strategy used for pathology keys outside the catalog.
pub fn fallback() -> Morphology {
    rhythm::sinus
}
