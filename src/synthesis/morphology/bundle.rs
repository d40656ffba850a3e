//! Bundle branch blocks.

use crate::intervals::BASE_PR_MS;
use crate::synthesis::template::Beat;
use crate::types::groups::{ANTEROSEPTAL, LATERAL, RIGHT_PRECORDIAL};

/// Right bundle branch block: rSR' in V1-V2, broad slurred S laterally.
pub fn rbbb(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, 120.0 * f.qrs);
    let w = beat.waves(tm);

    let qrs = if beat.in_group(RIGHT_PRECORDIAL) {
        w.r(30.0, 25.0, 0.4 * f.r) + w.s(50.0, 20.0, 0.2 * f.s) + w.r(90.0, 35.0, 0.6 * f.r)
    } else if beat.in_group(LATERAL) {
        w.r(30.0, 30.0, 0.8 * v.r * f.r) + w.s(80.0, 45.0, 1.5 * v.s * f.s)
    } else {
        w.r(30.0, 30.0, v.r * f.r) + w.s(70.0, 35.0, v.s * f.s)
    };

    w.p(0.15 * v.p * f.p) + qrs + w.j_takeoff(f.st_shift * 0.3) + w.t(45.0, 0.3 * v.t * f.t)
}

/// Left bundle branch block: deep QS in V1-V3, notched R laterally.
pub fn lbbb(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, 140.0 * f.qrs);
    let w = beat.waves(tm);
    let st = f.st_shift * 0.3;

    let complex = if beat.in_group(ANTEROSEPTAL) {
        w.s(70.0, 80.0, 1.2 * f.s) - w.j_takeoff(st) + w.t(45.0, 0.3 * f.t)
    } else if beat.in_group(LATERAL) {
        w.r(40.0, 45.0, 0.6 * v.r * f.r) + w.r(95.0, 45.0, 0.8 * v.r * f.r) + w.j_takeoff(st)
            - w.t(45.0, 0.3 * f.t)
    } else {
        w.r(70.0, 80.0, v.r * f.r) + w.j_takeoff(st)
    };

    w.p(0.15 * v.p * f.p) + complex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::template::tests::beat_at;
    use crate::types::{GlobalParameters, LeadId};

    fn trace(f: fn(&Beat) -> f64, lead: LeadId) -> Vec<f64> {
        let params = GlobalParameters::default();
        (0..1000)
            .map(|i| f(&beat_at(lead, i as f64 / 1000.0, 75.0, &params)))
            .collect()
    }

    fn local_maxima_above(trace: &[f64], floor: f64) -> usize {
        trace
            .windows(3)
            .filter(|w| w[1] > w[0] && w[1] >= w[2] && w[1] > floor)
            .count()
    }

    #[test]
    fn test_rbbb_rsr_prime_in_v1() {
        let v1 = trace(rbbb, LeadId::V1);
        assert!(local_maxima_above(&v1, 0.2) >= 2);
    }

    #[test]
    fn test_lbbb_v1_negative() {
        let v1 = trace(lbbb, LeadId::V1);
        let min = v1.iter().copied().fold(f64::MAX, f64::min);
        assert!(min < -1.0);
    }

    #[test]
    fn test_lbbb_lateral_t_inverted() {
        let params = GlobalParameters::default();
        let beat = beat_at(LeadId::V6, 0.0, 75.0, &params);
        let t_peak = beat.timing(160.0, 140.0).t_peak();
        assert!(lbbb(&beat_at(LeadId::V6, t_peak, 75.0, &params)) < -0.2);
        assert!(trace(lbbb, LeadId::V6).iter().any(|&v| v > 0.7));
    }
}
