//! Acute ST-elevation infarcts.
//!
//! Each territory gets pathological Q waves, a convex elevated ST segment
//! merging into the T wave, and reciprocal depression in the opposing
//! leads. Leads outside both groups keep a near-normal complex.

use crate::intervals::{BASE_PR_MS, BASE_QRS_MS};
use crate::synthesis::template::{Beat, Waves};
use crate::types::groups::{ANTERIOR, ANTEROSEPTAL, HIGH_LATERAL, INFERIOR, LATERAL};
use crate::types::LeadId;
use std::f64::consts::PI;

/// Injury current R gain in the territory.
const INJURY_R_GAIN: f64 = 1.06;
/// Extra J curve applied to infarct ST segments.
const INJURY_J_CURVE: f64 = 0.5;

/// Leads showing injury and their reciprocal mirror.
struct Territory {
    leads: &'static [LeadId],
    elevation: f64,
    reciprocal: &'static [LeadId],
    depression: f64,
}

const ANTERIOR_TERRITORY: Territory = Territory {
    leads: ANTERIOR,
    elevation: 0.35,
    reciprocal: INFERIOR,
    depression: 0.15,
};

const INFERIOR_TERRITORY: Territory = Territory {
    leads: INFERIOR,
    elevation: 0.35,
    reciprocal: HIGH_LATERAL,
    depression: 0.18,
};

const LATERAL_TERRITORY: Territory = Territory {
    leads: LATERAL,
    elevation: 0.30,
    reciprocal: INFERIOR,
    depression: 0.12,
};

/// P wave and septal Q shared by every infarct lead.
fn onset(beat: &Beat, w: &Waves<'_>) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    w.p(0.15 * v.p * f.p) + w.q(20.0, 0.1 * v.r * f.q)
}

/// Horizontal or downsloping ST depression.
fn depressed_st(beat: &Beat, w: &Waves<'_>, depression: f64) -> f64 {
    let jc = beat.factors.j_curve + INJURY_J_CURVE;
    let j = w.timing.j_point();
    -w.gaussian(j + 0.02, 0.03 + jc * 0.02, depression * 0.5)
        - w.gaussian(j + 0.10, 0.08, depression * 0.5)
}

fn injury(beat: &Beat, w: &Waves<'_>, base_elevation: f64) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = &w.timing;
    let j = tm.j_point();
    let jc = f.j_curve + INJURY_J_CURVE;
    let elevation = base_elevation + f.st_shift * 0.5;

    let mut value = w.r(30.0, 30.0, v.r * f.r * INJURY_R_GAIN)
        + w.gaussian(j + 0.02, 0.04 + jc * 0.03, elevation * 0.6)
        + w.gaussian(j + (tm.qt_duration - tm.qrs_duration) * 0.4, 0.10, elevation * 0.8)
        + w.t(50.0, elevation * 0.5 * f.t);

    let (start, end) = (j + 0.02, tm.t_peak() - 0.05);
    if f.st_slope != 0.0 && w.x > start && w.x < end {
        let progress = (w.x - start) / (end - start);
        value += f.st_slope * 0.15 * (progress - 0.5) * (progress * PI).sin();
    }
    value
}

fn reciprocal(beat: &Beat, w: &Waves<'_>, depression: f64) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    w.r(30.0, 30.0, v.r * f.r)
        + w.s(50.0, 25.0, 0.2 * v.s * f.s)
        + depressed_st(beat, w, depression - f.st_shift * 0.15)
        + w.t(45.0, 0.25 * v.t * f.t)
}

fn uninvolved(beat: &Beat, w: &Waves<'_>) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let mut value = w.r(30.0, 30.0, v.r * f.r) + w.s(50.0, 25.0, 0.2 * v.s * f.s);
    if f.st_shift != 0.0 {
        value += w.gaussian(w.timing.j_point() + 0.06, 0.08, f.st_shift * 0.25);
    }
    value + w.t(45.0, 0.3 * v.t * f.t)
}

fn territorial(beat: &Beat, territory: &Territory) -> f64 {
    let f = &beat.factors;
    let tm = beat.timing(BASE_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);

    let complex = if beat.in_group(territory.leads) {
        injury(beat, &w, territory.elevation)
    } else if beat.in_group(territory.reciprocal) {
        reciprocal(beat, &w, territory.depression)
    } else {
        uninvolved(beat, &w)
    };
    onset(beat, &w) + complex
}

/// Anterior infarct: elevation V1-V4, reciprocal inferior depression.
pub fn anterior(beat: &Beat) -> f64 {
    territorial(beat, &ANTERIOR_TERRITORY)
}

/// Inferior infarct: elevation II, III, aVF, reciprocal in I and aVL.
pub fn inferior(beat: &Beat) -> f64 {
    territorial(beat, &INFERIOR_TERRITORY)
}

/// Lateral infarct: elevation I, aVL, V5, V6, reciprocal inferior.
pub fn lateral(beat: &Beat) -> f64 {
    territorial(beat, &LATERAL_TERRITORY)
}

/// Posterior infarct, seen as its mirror image in V1-V3: tall R, ST
/// depression and upright T.
pub fn posterior(beat: &Beat) -> f64 {
    let f = &beat.factors;
    let v = &beat.vector;
    let tm = beat.timing(BASE_PR_MS * f.pr, BASE_QRS_MS * f.qrs);
    let w = beat.waves(tm);

    let complex = if beat.in_group(ANTEROSEPTAL) {
        w.r(30.0, 35.0, 1.2 * v.r * f.r)
            + depressed_st(beat, &w, 0.20 - f.st_shift * 0.2)
            + w.t(45.0, 0.4 * v.t.abs() * f.t)
    } else {
        uninvolved(beat, &w)
    };
    onset(beat, &w) + complex
}
