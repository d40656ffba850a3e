//! Electrode placement errors.
//!
//! A reversal does not change the heart, only what each lead sees: the
//! normal complex is drawn with a substituted lead vector.

use crate::synthesis::lead_vectors::LeadVector;
use crate::synthesis::template::{normal_complex, Beat};
use crate::types::LeadId;

fn drawn_with(beat: &Beat, vector: LeadVector) -> f64 {
    normal_complex(beat, vector, None, None)
}

/// Vector seen by `lead` with the left and right arm electrodes swapped.
pub fn la_ra_vector(lead: Option<LeadId>, own: LeadVector) -> LeadVector {
    match lead {
        Some(LeadId::I) => own.inverted(),
        Some(LeadId::AVR) => LeadVector::of(LeadId::AVL),
        Some(LeadId::AVL) => LeadVector::of(LeadId::AVR),
        Some(LeadId::II) => LeadVector::of(LeadId::III),
        Some(LeadId::III) => LeadVector::of(LeadId::II),
        _ => own,
    }
}

/// Vector seen by `lead` with the left arm and left leg electrodes swapped.
pub fn la_ll_vector(lead: Option<LeadId>, own: LeadVector) -> LeadVector {
    match lead {
        Some(LeadId::III) => LeadVector::FLAT,
        Some(LeadId::II) => LeadVector::of(LeadId::I),
        Some(LeadId::AVL) => LeadVector::of(LeadId::AVF),
        Some(LeadId::AVF) => LeadVector::of(LeadId::AVL),
        _ => own,
    }
}

/// Vector seen by `lead` with the right arm and left leg electrodes swapped.
pub fn ra_ll_vector(lead: Option<LeadId>, own: LeadVector) -> LeadVector {
    match lead {
        Some(LeadId::II) => LeadVector::FLAT,
        Some(LeadId::I | LeadId::III) => own.inverted(),
        Some(LeadId::AVR) => LeadVector::of(LeadId::AVF),
        Some(LeadId::AVF) => LeadVector::of(LeadId::AVR),
        _ => own,
    }
}

/// Vector seen by `lead` with V1 and V2 swapped.
pub fn precordial_vector(lead: Option<LeadId>, own: LeadVector) -> LeadVector {
    match lead {
        Some(LeadId::V1) => LeadVector::of(LeadId::V2),
        Some(LeadId::V2) => LeadVector::of(LeadId::V1),
        _ => own,
    }
}

/// Left arm / right arm reversal.
pub fn la_ra(beat: &Beat) -> f64 {
    drawn_with(beat, la_ra_vector(beat.lead, beat.vector))
}

/// Left arm / left leg reversal.
pub fn la_ll(beat: &Beat) -> f64 {
    drawn_with(beat, la_ll_vector(beat.lead, beat.vector))
}

/// Right arm / left leg reversal.
pub fn ra_ll(beat: &Beat) -> f64 {
    drawn_with(beat, ra_ll_vector(beat.lead, beat.vector))
}

/// V1 / V2 reversal.
pub fn precordial(beat: &Beat) -> f64 {
    drawn_with(beat, precordial_vector(beat.lead, beat.vector))
}
