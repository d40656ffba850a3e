//! Beat context, timing model and the normal-beat template.
//!
//! Times inside a beat are normalized phase in [0, 1). Millisecond
//! intervals are converted with the current cycle length, so a fixed PR of
//! 160 ms occupies a larger share of the cycle at higher rates.

use super::lead_vectors::LeadVector;
use super::primitives::Shaper;
use super::variability::BeatVariability;
use crate::intervals::{bazett_qt_ms, BASE_PR_MS, BASE_QRS_MS};
use crate::types::{lead_in, GlobalParameters, LeadId};
use std::f64::consts::PI;

/// Phase at which the P wave starts (ms before conversion).
pub const P_START_MS: f64 = 80.0;
/// P wave duration (ms).
pub const P_DURATION_MS: f64 = 80.0;
/// T peak position as a fraction of the QT duration.
pub const T_PEAK_FRACTION: f64 = 0.85;
/// Nominal T wave sigma (ms). Independent of the QT scale.
pub const T_SIGMA_MS: f64 = 35.0;

/// Parameter percentages converted to factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactors {
    /// P amplitude factor.
    pub p: f64,
    /// Q amplitude factor.
    pub q: f64,
    /// R amplitude factor.
    pub r: f64,
    /// S amplitude factor.
    pub s: f64,
    /// T amplitude factor.
    pub t: f64,
    /// Voltage scale.
    pub height: f64,
    /// Visual width scale.
    pub width: f64,
    /// Net ST shift in [-1, 1].
    pub st_shift: f64,
    /// J-point curve factor.
    pub j_curve: f64,
    /// ST slope factor.
    pub st_slope: f64,
    /// R descent factor.
    pub r_descent: f64,
    /// T descent factor.
    pub t_descent: f64,
    /// T biphasic factor.
    pub biphasic: f64,
    /// PR timing scale.
    pub pr: f64,
    /// QRS timing scale.
    pub qrs: f64,
    /// QT timing scale.
    pub qt: f64,
}

impl ShapeFactors {
    /// Converts a resolved parameter record.
    pub fn from_params(params: &GlobalParameters) -> Self {
        Self {
            p: params.p_wave_amp / 100.0,
            q: params.q_wave_amp / 100.0,
            r: params.r_wave_amp / 100.0,
            s: params.s_wave_amp / 100.0,
            t: params.t_wave_amp / 100.0,
            height: params.wave_height / 100.0,
            width: params.wave_width / 100.0,
            st_shift: params.st_shift(),
            j_curve: params.j_point_curve / 100.0,
            st_slope: params.st_slope / 100.0,
            r_descent: params.r_descent / 100.0,
            t_descent: params.t_wave_descent / 100.0,
            biphasic: params.t_wave_biphasic / 100.0,
            pr: params.pr_interval / 100.0,
            qrs: params.qrs_width / 100.0,
            qt: params.qt_interval / 100.0,
        }
    }
}

/// Everything a morphology needs to evaluate one sample.
#[derive(Debug, Clone, Copy)]
pub struct Beat {
    /// Lead being sampled, `None` if unrecognized.
    pub lead: Option<LeadId>,
    /// Table vector for `lead`.
    pub vector: LeadVector,
    /// Raw time (s), before RR warping.
    pub time: f64,
    /// Normalized phase within the (warped) cycle.
    pub phase: f64,
    /// Index of the (warped) beat.
    pub index: i64,
    /// Effective heart rate.
    pub hr: f64,
    /// Parameter factors.
    pub factors: ShapeFactors,
    /// Beat-to-beat variability.
    pub variability: BeatVariability,
    /// Gaussian evaluator with width and jitter applied.
    pub shaper: Shaper,
}

impl Beat {
    /// Cycle length in seconds.
    #[inline]
    pub fn cycle(&self) -> f64 {
        60.0 / self.hr
    }

    /// Cycle length in milliseconds.
    #[inline]
    pub fn cycle_ms(&self) -> f64 {
        60_000.0 / self.hr
    }

    /// Beat index from unwarped time, used by conduction schedules.
    pub fn schedule_index(&self) -> i64 {
        (self.time / self.cycle()).floor() as i64
    }

    /// Returns true if the sampled lead is `lead`.
    #[inline]
    pub fn is(&self, lead: LeadId) -> bool {
        self.lead == Some(lead)
    }

    /// Returns true if the sampled lead is in `group`.
    #[inline]
    pub fn in_group(&self, group: &[LeadId]) -> bool {
        lead_in(self.lead, group)
    }

    /// Timing with the QRS starting `pr_ms` after the P onset.
    pub fn timing(&self, pr_ms: f64, qrs_ms: f64) -> BeatTiming {
        let cms = self.cycle_ms();
        self.timing_from(P_START_MS / cms + pr_ms / cms, qrs_ms)
    }

    /// Timing with the QRS starting at a fixed phase.
    pub fn timing_from(&self, qrs_start: f64, qrs_ms: f64) -> BeatTiming {
        let cms = self.cycle_ms();
        BeatTiming {
            cycle_ms: cms,
            p_start: P_START_MS / cms,
            p_duration: P_DURATION_MS / cms,
            qrs_start,
            qrs_duration: qrs_ms / cms,
            qt_duration: bazett_qt_ms(self.hr) * self.factors.qt / cms,
            qrs_scale: self.factors.qrs,
        }
    }

    /// Wave builder evaluated at this beat's phase.
    pub fn waves(&self, timing: BeatTiming) -> Waves<'_> {
        self.waves_at(timing, self.phase)
    }

    /// Wave builder evaluated at an arbitrary phase.
    pub fn waves_at(&self, timing: BeatTiming, x: f64) -> Waves<'_> {
        Waves {
            beat: self,
            timing,
            x,
        }
    }

    /// Shorthand for a Gaussian at the current phase.
    #[inline]
    pub fn gaussian(&self, mean: f64, sigma: f64, amplitude: f64) -> f64 {
        self.shaper.gaussian(self.phase, mean, sigma, amplitude)
    }
}

/// Wave landmarks of one beat, in normalized phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatTiming {
    /// Cycle length (ms).
    pub cycle_ms: f64,
    /// P wave onset.
    pub p_start: f64,
    /// P wave duration.
    pub p_duration: f64,
    /// QRS onset.
    pub qrs_start: f64,
    /// QRS duration.
    pub qrs_duration: f64,
    /// QT duration.
    pub qt_duration: f64,
    /// Scale applied to QRS sub-component offsets and widths.
    pub qrs_scale: f64,
}

impl BeatTiming {
    /// Converts milliseconds to phase.
    #[inline]
    pub fn ms(&self, ms: f64) -> f64 {
        ms / self.cycle_ms
    }

    /// Phase of a QRS landmark `ms` after QRS onset, scaled by the QRS width.
    #[inline]
    pub fn at(&self, ms: f64) -> f64 {
        self.qrs_start + ms * self.qrs_scale / self.cycle_ms
    }

    /// Width of a QRS sub-component, scaled by the QRS width.
    #[inline]
    pub fn span(&self, ms: f64) -> f64 {
        ms / self.cycle_ms * self.qrs_scale
    }

    /// J-point (end of QRS).
    #[inline]
    pub fn j_point(&self) -> f64 {
        self.qrs_start + self.qrs_duration
    }

    /// T wave peak.
    #[inline]
    pub fn t_peak(&self) -> f64 {
        self.qrs_start + self.qt_duration * T_PEAK_FRACTION
    }

    /// Center of the P wave.
    #[inline]
    pub fn p_center(&self) -> f64 {
        self.p_start + self.p_duration / 2.0
    }
}

/// Builds the standard wave components for bespoke morphologies.
#[derive(Debug, Clone, Copy)]
pub struct Waves<'a> {
    beat: &'a Beat,
    /// Landmarks used for placement.
    pub timing: BeatTiming,
    /// Phase being evaluated.
    pub x: f64,
}

impl Waves<'_> {
    /// Gaussian at `x`.
    #[inline]
    pub fn gaussian(&self, mean: f64, sigma: f64, amplitude: f64) -> f64 {
        self.beat.shaper.gaussian(self.x, mean, sigma, amplitude)
    }

    /// P wave with the given amplitude.
    pub fn p(&self, amplitude: f64) -> f64 {
        let tm = &self.timing;
        self.gaussian(tm.p_center(), tm.p_duration / 3.0, amplitude)
    }

    /// Negative Q deflection `width_ms` wide at QRS onset.
    pub fn q(&self, width_ms: f64, amplitude: f64) -> f64 {
        let width = self.timing.span(width_ms);
        -self.gaussian(self.timing.qrs_start + width / 2.0, width / 2.0, amplitude)
    }

    /// R wave centered `at_ms` after QRS onset, with the R descent applied.
    pub fn r(&self, at_ms: f64, width_ms: f64, amplitude: f64) -> f64 {
        self.beat.shaper.asymmetric(
            self.x,
            self.timing.at(at_ms),
            self.timing.span(width_ms) / 2.0,
            amplitude,
            self.beat.factors.r_descent,
        )
    }

    /// Negative S deflection centered `at_ms` after QRS onset.
    pub fn s(&self, at_ms: f64, width_ms: f64, amplitude: f64) -> f64 {
        -self.gaussian(self.timing.at(at_ms), self.timing.span(width_ms) / 2.0, amplitude)
    }

    /// J-point takeoff bump. Silent when the J curve is zero.
    pub fn j_takeoff(&self, amplitude: f64) -> f64 {
        let jc = self.beat.factors.j_curve;
        if jc > 0.0 {
            self.gaussian(self.timing.j_point(), 0.02 + jc * 0.03, amplitude)
        } else {
            0.0
        }
    }

    /// T wave at the QT-derived peak, `width_ms` sigma.
    pub fn t(&self, width_ms: f64, amplitude: f64) -> f64 {
        let f = &self.beat.factors;
        self.beat.shaper.biphasic(
            self.x,
            self.timing.t_peak(),
            self.timing.ms(width_ms),
            amplitude,
            f.t_descent,
            f.biphasic,
        )
    }
}

/// The normal P-QRS-ST-T complex.
///
/// `vector` may differ from the beat's own vector (electrode reversals).
/// `pr_ms` and `qrs_ms` override the interval controls when given.
pub fn normal_complex(
    beat: &Beat,
    vector: LeadVector,
    pr_ms: Option<f64>,
    qrs_ms: Option<f64>,
) -> f64 {
    let f = &beat.factors;
    let var = &beat.variability;
    let sh = &beat.shaper;
    let x = beat.phase;

    let pr = pr_ms.unwrap_or(BASE_PR_MS * f.pr);
    let qrs = qrs_ms.unwrap_or(BASE_QRS_MS * f.qrs);
    let mut tm = beat.timing(pr, qrs);
    tm.qrs_scale = qrs_ms.map_or(f.qrs, |ms| ms / BASE_QRS_MS);
    let q_scale = if qrs_ms.is_some() { 1.0 } else { f.qrs };
    let wv = var.qrs_width;

    let mut v = sh.gaussian(
        x,
        tm.p_center(),
        tm.p_duration / 3.0 * wv,
        0.15 * vector.p * var.p_amplitude * f.p,
    );

    let q_width = tm.ms(20.0) * q_scale;
    v -= sh.gaussian(
        x,
        tm.qrs_start + q_width / 2.0,
        q_width / 2.0 * wv,
        0.08 * vector.r * f.q,
    );
    v += sh.asymmetric(x, tm.at(30.0), tm.span(30.0) / 2.0 * wv, vector.r * f.r, f.r_descent);
    v -= sh.gaussian(x, tm.at(50.0), tm.span(25.0) / 2.0 * wv, vector.s * f.s);

    let j = tm.j_point();
    if f.st_shift != 0.0 {
        v += sh.gaussian(x, j, tm.ms(20.0 + f.j_curve * 40.0), f.st_shift * 0.5);
    }

    let st_end = j + (tm.qt_duration - tm.qrs_duration) * 0.4;
    if x > j && x < st_end {
        let progress = (x - j) / (st_end - j);
        let level = f.st_shift * 0.4 + f.st_slope * 0.3 * (progress - 0.5);
        v += level * (progress * PI).sin();
    }

    v += sh.biphasic(
        x,
        tm.t_peak(),
        tm.ms(T_SIGMA_MS) * wv,
        0.3 * vector.t * var.t_amplitude * f.t,
        f.t_descent,
        f.biphasic,
    );
    v
}
