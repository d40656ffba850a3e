//! Potassium disturbances.

use crate::intervals::BASE_PR_MS;
use crate::synthesis::template::{normal_complex, Beat};
use crate::types::LeadId;

/// Peaked T amplitude for leads without a bespoke hyperkalemic complex.
fn peaked_t_gain(lead: Option<LeadId>) -> f64 {
    match lead {
        Some(LeadId::II | LeadId::V4) => 1.8,
        Some(LeadId::V5 | LeadId::III | LeadId::AVF) => 1.4,
        Some(LeadId::AVL) => 1.0,
        _ => 1.2,
    }
}

/// Hyperkalemia: flattened P, widened QRS and tall narrow peaked T waves,
/// most marked in V2-V4.
pub fn hyperkalemia(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let tm = beat.timing(BASE_PR_MS * f.pr, 110.0 * f.qrs);
    let w = beat.waves(tm);
    let st = f.st_shift * 0.3;

    let right_precordial = |s_gain: f64, t_gain: f64| {
        w.r(55.0, 50.0, -s_gain * f.s) - w.j_takeoff(st) + w.t(25.0, t_gain * f.t)
    };

    let complex = match beat.lead {
        Some(LeadId::V1) => right_precordial(1.2, 1.4),
        Some(LeadId::V2) => right_precordial(1.5, 2.2),
        Some(LeadId::V3) => right_precordial(1.0, 2.4),
        Some(LeadId::AVR) => w.r(55.0, 45.0, -0.2 * f.r) + w.t(25.0, -1.4 * f.t),
        lead => {
            w.r(45.0, 45.0, 0.25 * f.r) + w.j_takeoff(st) + w.t(25.0, peaked_t_gain(lead) * f.t)
        }
    };

    let mut value = w.p(0.05 * f.p) + complex;
    if f.st_shift != 0.0 {
        value += f.st_shift * 0.4 * w.gaussian(tm.j_point() + 0.08, 0.06, 1.0);
    }
    value
}

/// Hypokalemia: flattened T with a prominent U wave and sagging ST.
pub fn hypokalemia(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let t = beat.vector.t * f.t;
    normal_complex(beat, beat.vector, None, None) - beat.gaussian(0.45, 0.05, 0.2 * t)
        + beat.gaussian(0.6, 0.04, 0.25 * t)
        - 0.08 * beat.gaussian(0.35, 0.1, 1.0) * f.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::template::tests::beat_at;
    use crate::types::GlobalParameters;

    fn peak(f: fn(&Beat) -> f64, lead: LeadId, from: f64, to: f64) -> f64 {
        let params = GlobalParameters::default();
        (0..=500)
            .map(|i| f(&beat_at(lead, from + (to - from) * i as f64 / 500.0, 75.0, &params)))
            .fold(f64::MIN, f64::max)
    }

    fn sinus(beat: &Beat) -> f64 {
        normal_complex(beat, beat.vector, None, None)
    }

    #[test]
    fn test_hyperkalemia_peaked_t_v2() {
        let hyper = peak(hyperkalemia, LeadId::V2, 0.5, 0.95);
        let normal = peak(sinus, LeadId::V2, 0.5, 0.95);
        assert!(hyper >= 2.0 * normal, "{hyper} vs {normal}");
    }

    #[test]
    fn test_hyperkalemia_avr_t_inverted() {
        let params = GlobalParameters::default();
        let beat = beat_at(LeadId::AVR, 0.0, 75.0, &params);
        let t_peak = beat.timing(160.0, 110.0).t_peak();
        assert!(hyperkalemia(&beat_at(LeadId::AVR, t_peak, 75.0, &params)) < -1.0);
    }

    #[test]
    fn test_hypokalemia_u_wave() {
        let params = GlobalParameters::default();
        let hypo = hypokalemia(&beat_at(LeadId::V3, 0.6, 75.0, &params));
        let normal = sinus(&beat_at(LeadId::V3, 0.6, 75.0, &params));
        assert!(hypo > normal);
    }
}
