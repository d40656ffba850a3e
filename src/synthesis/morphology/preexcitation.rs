//! Accessory pathway syndromes.

use crate::intervals::BASE_QRS_MS;
use crate::synthesis::template::Beat;

/// Short PR shared by both syndromes (ms at 100% scale).
const SHORT_PR_MS: f64 = 100.0;

/// Wolff-Parkinson-White: short PR, slurred delta wave, wide QRS and
/// secondary T inversion.
pub fn wpw(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(SHORT_PR_MS * f.pr, 120.0 * f.qrs);
    let w = beat.waves(tm);

    let delta = w.gaussian(tm.at(20.0), tm.span(40.0) / 2.0, 0.3 * v.r * f.r);
    w.p(0.15 * v.p * f.p)
        + delta
        + w.r(60.0, 35.0, 0.8 * v.r * f.r)
        + w.s(90.0, 30.0, 0.8 * v.s * f.s)
        + w.j_takeoff(f.st_shift * 0.3)
        - w.t(40.0, 0.2 * v.t * f.t)
}

/// Lown-Ganong-Levine: short PR with an otherwise normal complex.
pub fn lgl(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(SHORT_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);

    w.p(0.15 * v.p * f.p)
        + w.q(20.0, 0.08 * v.r * f.q)
        + w.r(30.0, 30.0, v.r * f.r)
        + w.s(50.0, 25.0, v.s * f.s)
        + w.j_takeoff(f.st_shift * 0.3)
        + w.t(35.0, 0.3 * v.t * f.t)
}
