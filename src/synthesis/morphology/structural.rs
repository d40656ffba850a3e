//! Right heart strain and pericardial effusion.

use crate::intervals::{BASE_PR_MS, BASE_QRS_MS};
use crate::synthesis::template::{normal_complex, Beat};
use crate::types::groups::ANTEROSEPTAL;
use crate::types::LeadId;

/// Global voltage reduction from the effusion.
const LOW_VOLTAGE: f64 = 0.5;
/// Amplitude of the smaller alternating beat.
const ALTERNANS_LOW: f64 = 0.6;

/// Pulmonary embolism: S1Q3T3 with anteroseptal T inversion.
pub fn pe(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let mut value = normal_complex(beat, beat.vector, None, None);
    match beat.lead {
        Some(LeadId::I) => value -= beat.gaussian(0.3, 0.015, 0.3 * f.s),
        Some(LeadId::III) => {
            value -= beat.gaussian(0.26, 0.01, 0.25 * f.q);
            value -= beat.gaussian(0.45, 0.05, 0.2 * f.t);
        }
        _ => {}
    }
    if beat.in_group(ANTEROSEPTAL) {
        value -= beat.gaussian(0.45, 0.05, 0.4 * f.t);
    }
    value
}

/// Cardiac tamponade: low voltage with beat-to-beat electrical alternans.
pub fn tamponade(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);
    let alternans = if beat.schedule_index().rem_euclid(2) == 0 {
        1.0
    } else {
        ALTERNANS_LOW
    };
    let gain = LOW_VOLTAGE * alternans;

    w.p(0.12 * v.p * f.p * LOW_VOLTAGE)
        + w.q(20.0, 0.08 * v.r * f.q * gain)
        + w.r(30.0, 30.0, 0.8 * v.r * f.r * gain)
        + w.s(50.0, 25.0, 0.8 * v.s * f.s * gain)
        + w.j_takeoff(f.st_shift * 0.3 * gain)
        + w.t(40.0, 0.2 * v.t * f.t * gain)
}
