//! Atrioventricular conduction blocks.
//!
//! Dropped-beat schedules count beats on unwarped time so the pattern stays
//! fixed even when RR variability is enabled.

use crate::intervals::BASE_PR_MS;
use crate::synthesis::template::{normal_complex, Beat};

/// Wenckebach PR progression (ms) before the dropped beat.
const WENCKEBACH_PR_MS: [f64; 3] = [180.0, 240.0, 320.0];

/// Non-conducted P wave.
fn p_only(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let tm = beat.timing(BASE_PR_MS * f.pr, 0.0);
    beat.waves(tm).p(0.15 * beat.vector.p * f.p)
}

/// Fixed PR of 240 ms.
pub fn first_degree(beat: &Beat) -> f64 {
    normal_complex(beat, beat.vector, Some(240.0), None)
}

/// Progressive PR lengthening, every fourth P wave not conducted.
pub fn mobitz1(beat: &Beat) -> f64 {
    match WENCKEBACH_PR_MS.get(beat.schedule_index().rem_euclid(4) as usize) {
        Some(&pr) => normal_complex(beat, beat.vector, Some(pr), None),
        None => p_only(beat),
    }
}

/// Constant PR, wide QRS, every third P wave not conducted.
pub fn mobitz2(beat: &Beat) -> f64 {
    if beat.schedule_index().rem_euclid(3) == 2 {
        return p_only(beat);
    }
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(200.0 * f.pr, 140.0 * f.qrs);
    let w = beat.waves(tm);

    w.p(0.15 * v.p * f.p)
        + w.q(30.0, 0.08 * v.r * f.q)
        + w.r(50.0, 40.0, v.r * f.r)
        + w.s(100.0, 35.0, 1.2 * v.s * f.s)
        + w.j_takeoff(f.st_shift * 0.3)
        + w.t(50.0, 0.3 * v.t * f.t)
}

/// Complete heart block: atria at 80 bpm, ventricles at the escape rate.
///
/// Escape rates of 40 bpm and above are junctional with a narrow QRS;
/// slower rates are ventricular with a wide QRS and discordant T.
pub fn third_degree(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let junctional = beat.hr >= 40.0;

    let p_phase = (beat.time * 1.33).rem_euclid(1.0);
    let mut value = beat
        .shaper
        .gaussian(p_phase, 0.1, 0.025, 0.15 * v.p * f.p);

    let qrs_ms = if junctional { 90.0 } else { 140.0 } * f.qrs;
    let vent_phase = (beat.time * beat.hr / 60.0).rem_euclid(1.0);
    let tm = beat.timing_from(0.15, qrs_ms);
    let w = beat.waves_at(tm, vent_phase);

    let (q_width, r_at, r_gain) = if junctional {
        (20.0, 30.0, 1.0)
    } else {
        (30.0, 50.0, 1.1)
    };
    let (s_at, s_width, s_amp) = if junctional {
        (50.0, 25.0, v.s)
    } else {
        (100.0, 40.0, 0.8 * v.s)
    };
    let t_sign = if !junctional && v.r > 0.0 { -0.3 } else { 0.3 };

    value += w.q(q_width, 0.08 * v.r * f.q)
        + w.r(r_at, r_at, r_gain * v.r * f.r)
        + w.s(s_at, s_width, s_amp * f.s)
        + w.j_takeoff(f.st_shift * 0.3)
        + w.t(50.0, t_sign * v.t.abs() * f.t);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::template::tests::beat_at;
    use crate::types::{GlobalParameters, LeadId};

    const R_PHASE: f64 = 0.3375;

    fn at_beat(index: i64, phase: f64) -> Beat {
        let params = GlobalParameters::default();
        let mut beat = beat_at(LeadId::II, phase, 75.0, &params);
        beat.time = (index as f64 + phase) * 0.8;
        beat
    }

    #[test]
    fn test_mobitz1_drops_fourth_beat() {
        for index in 0..8 {
            let beat = at_beat(index, 0.1 + 0.04);
            let p = mobitz1(&beat);
            assert!(p > 0.05, "P wave missing on beat {index}");
        }
        // The dropped beat has no QRS anywhere after the P wave.
        let max_dropped = (0..100)
            .map(|i| mobitz1(&at_beat(3, 0.25 + i as f64 * 0.005)).abs())
            .fold(0.0, f64::max);
        assert!(max_dropped < 0.05);
        let max_conducted = (0..100)
            .map(|i| mobitz1(&at_beat(2, 0.25 + i as f64 * 0.005)).abs())
            .fold(0.0, f64::max);
        assert!(max_conducted > 1.0);
    }

    #[test]
    fn test_mobitz2_drops_third_beat() {
        let peak = |index| {
            (0..100)
                .map(|i| mobitz2(&at_beat(index, 0.25 + i as f64 * 0.005)).abs())
                .fold(0.0, f64::max)
        };
        assert!(peak(0) > 1.0);
        assert!(peak(1) > 1.0);
        assert!(peak(2) < 0.05);
        assert!(peak(5) < 0.05);
    }

    #[test]
    fn test_first_degree_delays_qrs() {
        let beat = at_beat(0, R_PHASE);
        assert!(first_degree(&beat) < sinus_peak() * 0.5);
    }

    fn sinus_peak() -> f64 {
        let beat = at_beat(0, R_PHASE);
        normal_complex(&beat, beat.vector, None, None)
    }

    #[test]
    fn test_third_degree_finite_at_both_rates() {
        let params = GlobalParameters::default();
        for hr in [30.0, 45.0] {
            for i in 0..400 {
                let mut beat = beat_at(LeadId::V5, 0.0, hr, &params);
                beat.time = i as f64 * 0.01;
                assert!(third_degree(&beat).is_finite());
            }
        }
    }
}
