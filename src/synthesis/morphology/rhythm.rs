//! Sinus, supraventricular and ventricular rhythms.

use crate::intervals::BASE_QRS_MS;
use crate::synthesis::template::{normal_complex, Beat};
use crate::types::LeadId;
use std::f64::consts::TAU;

/// QRS onset phase for rhythms without a conducted P wave.
const SUPRAVENTRICULAR_QRS_START: f64 = 0.15;

/// Normal sinus rhythm and its rate variants.
pub fn sinus(beat: &Beat) -> f64 {
    normal_complex(beat, beat.vector, None, None)
}

/// Narrow complex without a P wave, T amplitude `t_scale`.
fn narrow_complex(beat: &Beat, x: f64, qrs_start: f64, t_scale: f64) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing_from(qrs_start, BASE_QRS_MS * f.qrs);
    let w = beat.waves_at(tm, x);

    w.q(20.0, 0.08 * v.r * f.q)
        + w.r(30.0, 30.0, v.r * f.r)
        + w.s(50.0, 25.0, v.s * f.s)
        + w.j_takeoff(f.st_shift * 0.3)
        + w.t(35.0, t_scale * v.t * f.t)
}

/// Atrial fibrillation: fibrillatory baseline with irregularly timed QRS.
pub fn afib(beat: &Beat) -> f64 {
    let t = beat.time;
    let fibrillation = 0.03 * ((t * 50.0).sin() + (t * 73.0).sin() + (t * 91.0).sin()) / 3.0;
    let x = (beat.phase + (t * 2.3).sin() * 0.15 + 1.0).rem_euclid(1.0);
    fibrillation + narrow_complex(beat, x, SUPRAVENTRICULAR_QRS_START, 0.3)
}

/// Atrial flutter: 5 Hz sawtooth flutter waves under a regular QRS.
pub fn aflutter(beat: &Beat) -> f64 {
    let phi = beat.time * 5.0 * TAU;
    let wave = -phi.sin() * 0.6 - (2.0 * phi).sin() * 0.2;
    let amplitude = match beat.lead {
        Some(LeadId::II | LeadId::III | LeadId::AVF) => 0.18,
        Some(LeadId::AVR) => -0.12,
        Some(LeadId::V1) => 0.14,
        _ => 0.08,
    };
    amplitude * wave * beat.factors.p
        + narrow_complex(beat, beat.phase, SUPRAVENTRICULAR_QRS_START, 0.2)
}

/// Re-entrant narrow complex tachycardia with no visible P wave.
pub fn svt(beat: &Beat) -> f64 {
    narrow_complex(beat, beat.phase, 0.10, 0.25)
}

/// Wide monomorphic complexes with discordant T waves.
pub fn vtach(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing_from(0.08, 140.0 * f.qrs);
    let w = beat.waves(tm);
    let amp = (v.r * f.r + v.s * f.s) / 2.0;
    let t_amp = if amp > 0.0 { -0.4 * f.t } else { 0.4 * f.t };

    w.q(40.0, 0.15 * amp) + w.r(60.0, 60.0, 1.2 * amp) + w.s(110.0, 50.0, 0.5 * amp) + w.t(50.0, t_amp)
}

/// Chaotic oscillation with no discrete complexes.
pub fn vfib(beat: &Beat) -> f64 {
    let t = beat.time;
    0.4 * ((t * 15.0 + (t * 7.0).sin()).sin()
        + 0.7 * (t * 23.0).sin()
        + 0.5 * (t * 31.0).sin())
        / 2.5
}

/// Near-flat line.
pub fn asystole(beat: &Beat) -> f64 {
    0.01 * (beat.time * 3.0).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::template::tests::beat_at;
    use crate::types::GlobalParameters;

    #[test]
    fn test_vfib_bounded() {
        let params = GlobalParameters::default();
        for i in 0..2000 {
            let mut beat = beat_at(LeadId::II, 0.0, 75.0, &params);
            beat.time = i as f64 * 0.005;
            assert!(vfib(&beat).abs() <= 0.4 * 2.2 / 2.5 + 1e-9);
        }
    }

    #[test]
    fn test_asystole_near_flat() {
        let params = GlobalParameters::default();
        let mut beat = beat_at(LeadId::V3, 0.0, 75.0, &params);
        for i in 0..500 {
            beat.time = i as f64 * 0.01;
            assert!(asystole(&beat).abs() <= 0.01);
        }
    }

    #[test]
    fn test_flutter_waves_largest_inferior() {
        let params = GlobalParameters::default();
        let peak = |lead| {
            (0..200)
                .map(|i| {
                    let mut beat = beat_at(lead, 0.05, 150.0, &params);
                    beat.time = i as f64 * 0.001;
                    aflutter(&beat).abs()
                })
                .fold(0.0, f64::max)
        };
        assert!(peak(LeadId::II) > peak(LeadId::I));
    }

    #[test]
    fn test_vtach_t_discordant() {
        let params = GlobalParameters::default();
        let beat = beat_at(LeadId::II, 0.0, 150.0, &params);
        let tm = beat.timing_from(0.08, 140.0);
        let tpk = tm.t_peak();
        let at_t = beat_at(LeadId::II, tpk, 150.0, &params);
        assert!(vtach(&at_t) < 0.0);
    }
}
