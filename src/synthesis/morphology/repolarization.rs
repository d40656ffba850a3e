//! Repolarization abnormalities: long QT, pericarditis and benign early
//! repolarization.

use crate::intervals::{BASE_PR_MS, BASE_QRS_MS};
use crate::synthesis::template::{normal_complex, Beat, Waves};
use crate::types::LeadId;

/// Normal-width P and QRS used by the bespoke complexes in this module.
fn sinus_qrs(beat: &Beat, w: &Waves<'_>) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    w.p(0.15 * v.p * f.p)
        + w.q(20.0, 0.08 * v.r * f.q)
        + w.r(30.0, 30.0, v.r * f.r)
        + w.s(50.0, 25.0, v.s * f.s)
}

/// Long QT: the QT scale does the prolongation, plus a late T component.
pub fn long_qt(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let mut value = normal_complex(beat, beat.vector, None, None);
    if f.t > 0.3 {
        value += beat.gaussian(0.55, 0.04, 0.15 * beat.vector.t * f.t * f.height);
    }
    value
}

/// Acute pericarditis: diffuse concave ST elevation and PR depression,
/// both reversed in aVR.
pub fn pericarditis(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);
    let avr = beat.is(LeadId::AVR);
    let sign = if avr { -1.0 } else { 1.0 };

    let pr_segment = 0.05 * w.gaussian(tm.p_start - 0.02, 0.05, 1.0) * f.height;
    let mut value = -sign * pr_segment + sinus_qrs(beat, &w);
    value += sign * w.j_takeoff(f.st_shift * 0.3);

    let st = w.gaussian(tm.j_point() + 0.04, 0.12, 1.0) * f.height;
    value += match beat.lead {
        Some(LeadId::AVR) => -(0.15 + f.st_shift * 0.3) * st,
        Some(LeadId::V1) => -0.05 * st,
        _ => (0.15 + f.st_shift * 0.3) * st,
    };
    value + w.t(40.0, 0.3 * v.t * f.t)
}

/// J-point elevation for early repolarization, largest in V2-V5.
fn j_notch_gain(lead: Option<LeadId>) -> f64 {
    match lead {
        Some(LeadId::V2 | LeadId::V3 | LeadId::V4 | LeadId::V5) => 0.25,
        Some(LeadId::V1 | LeadId::V6 | LeadId::I | LeadId::II) => 0.15,
        _ => 0.08,
    }
}

/// Benign early repolarization: J-point notch and concave ST elevation.
pub fn early_repol(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);
    let j = tm.j_point();

    let mut value = sinus_qrs(beat, &w)
        + w.gaussian(j, 0.015 + f.j_curve * 0.02, j_notch_gain(beat.lead) * f.height);
    if !beat.is(LeadId::AVR) && !beat.is(LeadId::V1) {
        value += (0.1 + f.st_shift * 0.3) * w.gaussian(j + 0.04, 0.06, 1.0) * f.height;
    }
    value + w.t(40.0, 0.4 * v.t * f.t)
}
