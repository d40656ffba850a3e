//! Pathology preset catalog.
//!
//! Maps every [`Pathology`] to its display metadata and the parameter state
//! that [`ParameterStore::apply_preset`](crate::store::ParameterStore::apply_preset)
//! installs. Most pathologies declare nothing and fall back to factory
//! defaults with an empty override map.

use crate::types::{GlobalParameters, LeadId, LeadOverride, LeadOverrideMap, Param, Pathology};
use crate::types::Param::{
    JPointCurve as J, PWaveAmp as P, QWaveAmp as Q, RDescent, RWaveAmp as R, SWaveAmp as S,
    StDepression as StD, StElevation as StE, StSlope as Slope, TWaveAmp as T, TWaveDescent,
    WaveHeight as Height, WaveWidth as Width,
};

/// Per-lead parameter values declared by a preset.
pub type LeadValues = (LeadId, &'static [(Param, f64)]);

/// A catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct PathologyPreset {
    /// The pathology this entry describes.
    pub kind: Pathology,
    /// Human-readable title.
    pub display_name: &'static str,
    /// Characteristic ECG findings, for labeling.
    pub findings: &'static [&'static str],
    /// Heart rate hint shown next to the rate control.
    pub rate_hint: &'static str,
    /// Global values; unspecified fields take factory defaults.
    pub global_defaults: &'static [(Param, f64)],
    /// Per-lead override values.
    pub lead_overrides: &'static [LeadValues],
}

impl PathologyPreset {
    /// Returns the full global record this preset installs.
    pub fn globals(&self) -> GlobalParameters {
        GlobalParameters::with_values(self.global_defaults)
    }

    /// Returns the override map this preset installs.
    pub fn overrides(&self) -> LeadOverrideMap {
        self.lead_overrides
            .iter()
            .map(|&(lead, values)| (lead, LeadOverride::from_values(values)))
            .collect()
    }
}

const FACTORY_WAVEFORM: &[(Param, f64)] = &[
    (Param::PrInterval, 100.0),
    (Param::QrsWidth, 100.0),
    (Param::QtInterval, 100.0),
    (P, 100.0),
    (Q, 100.0),
    (R, 100.0),
    (S, 100.0),
    (T, 100.0),
    (StE, 0.0),
    (StD, 0.0),
    (J, 20.0),
    (Slope, 0.0),
    (RDescent, 0.0),
    (TWaveDescent, 0.0),
    (Param::TWaveBiphasic, 0.0),
    (Height, 100.0),
    (Width, 100.0),
];

const LONG_QT: &[(Param, f64)] = &[
    (Param::QtInterval, 140.0),
    (S, 74.0),
    (T, 41.0),
    (RDescent, 0.0),
    (Height, 57.0),
    (Width, 107.0),
];

#[rustfmt::skip]
const HYPERKALEMIA: &[LeadValues] = &[
    (LeadId::I, &[(P, 157.0), (Q, 87.0), (R, 31.0), (S, 160.0), (T, 33.0), (StE, 86.0), (StD, 24.0), (J, 300.0), (Slope, 8.0), (Height, 100.0), (Width, 200.0)]),
    (LeadId::AVR, &[(P, 300.0), (Q, 54.0), (R, 0.0), (S, 0.0), (T, 3.0), (StE, 70.0), (StD, 10.0), (J, 281.0), (Slope, 26.0), (Height, 144.0), (Width, 200.0)]),
    (LeadId::V1, &[(P, 87.0), (Q, 215.0), (R, 84.0), (S, 61.0), (T, 39.0), (StE, 87.0), (StD, 72.0), (J, 123.0), (Slope, -45.0), (Height, 126.0), (Width, 139.0)]),
    (LeadId::V2, &[(P, 74.0), (Q, 110.0), (R, 131.0), (S, 112.0), (T, 65.0), (StE, 69.0), (StD, 36.0), (J, 90.0), (Slope, -64.0), (Height, 97.0), (Width, 120.0)]),
    (LeadId::V3, &[(P, 100.0), (Q, 100.0), (R, 100.0), (S, 205.0), (T, 107.0), (StE, 46.0), (StD, 8.0), (J, 0.0), (Slope, 100.0), (Height, 94.0), (Width, 133.0)]),
    (LeadId::V4, &[(P, 58.0), (Q, 227.0), (R, 25.0), (S, 22.0), (T, 82.0), (StE, 24.0), (StD, 100.0), (J, 300.0), (Slope, -29.0), (Height, 120.0), (Width, 173.0)]),
    (LeadId::V5, &[(P, 275.0), (Q, 239.0), (R, 215.0), (S, 30.0), (T, 141.0), (StE, 0.0), (StD, 100.0), (J, 300.0), (Slope, -7.0), (Height, 83.0), (Width, 153.0)]),
    (LeadId::V6, &[(P, 227.0), (Q, 272.0), (R, 181.0), (S, 0.0), (T, 144.0), (StE, 51.0), (StD, 100.0), (J, 266.0), (Slope, -11.0), (RDescent, 0.0), (TWaveDescent, 100.0), (Height, 60.0), (Width, 111.0)]),
    (LeadId::II, &[(P, 227.0), (Q, 217.0), (R, 136.0), (S, 116.0), (T, 24.0), (StE, 46.0), (StD, 2.0), (J, 210.0), (Slope, 6.0), (Height, 190.0), (Width, 139.0)]),
    (LeadId::III, &[(P, 100.0), (Q, 100.0), (R, 100.0), (S, 100.0), (T, 39.0), (StE, 72.0), (StD, 0.0), (J, 20.0), (Slope, 0.0), (Height, 142.0), (Width, 100.0)]),
    (LeadId::AVL, &[(P, 169.0), (Q, 249.0), (R, 104.0), (S, 23.0), (T, 23.0), (StE, 19.0), (StD, 10.0), (J, 0.0), (Slope, -41.0), (Height, 184.0), (Width, 200.0)]),
    (LeadId::AVF, &[(P, 100.0), (Q, 100.0), (R, 100.0), (S, 100.0), (T, 67.0), (StE, 87.0), (StD, 23.0), (J, 186.0), (Slope, 0.0), (Height, 60.0), (Width, 121.0)]),
];

const fn entry(
    kind: Pathology,
    display_name: &'static str,
    findings: &'static [&'static str],
    rate_hint: &'static str,
) -> PathologyPreset {
    PathologyPreset {
        kind,
        display_name,
        findings,
        rate_hint,
        global_defaults: &[],
        lead_overrides: &[],
    }
}

/// Returns the catalog entry for `kind`.
pub fn preset(kind: Pathology) -> PathologyPreset {
    use Pathology::*;

    match kind {
        Normal => PathologyPreset {
            global_defaults: FACTORY_WAVEFORM,
            ..entry(kind, "Normal Sinus Rhythm", &[
                "Regular rhythm with rate 60-100 bpm",
                "Upright P wave in I, II, aVF (inverted in aVR)",
                "PR interval 120-200ms",
                "Narrow QRS <120ms",
                "Each P wave followed by QRS",
            ], "")
        },
        SinusBrady => PathologyPreset {
            global_defaults: FACTORY_WAVEFORM,
            ..entry(kind, "Sinus Bradycardia", &[
                "Regular rhythm with rate <60 bpm",
                "Normal P wave morphology",
                "Normal PR and QRS intervals",
                "Common in athletes, sleep, or beta-blocker use",
            ], "(≤59 bpm)")
        },
        SinusTachy => PathologyPreset {
            global_defaults: FACTORY_WAVEFORM,
            ..entry(kind, "Sinus Tachycardia", &[
                "Regular rhythm with rate >100 bpm",
                "Normal P waves (may merge with preceding T wave)",
                "Normal PR and QRS intervals",
                "P wave may be hidden in T wave at high rates",
            ], "(≥101 bpm)")
        },
        Afib => entry(kind, "Atrial Fibrillation", &[
            "Irregularly irregular R-R intervals",
            "Absent P waves",
            "Fibrillatory baseline (chaotic atrial activity)",
            "Variable ventricular rate",
            "Narrow QRS unless aberrant conduction",
        ], ""),
        Aflutter => entry(kind, "Atrial Flutter", &[
            "Sawtooth flutter waves (F waves) best seen in II, III, aVF",
            "Atrial rate ~300 bpm",
            "Variable AV block: 2:1 (150), 3:1 (100), 4:1 (75)",
            "Regular or regularly irregular ventricular response",
            "No isoelectric baseline between F waves",
        ], "(75-150: 4:1 to 2:1 block)"),
        Svt => entry(kind, "SVT (AVNRT)", &[
            "Regular narrow complex tachycardia",
            "Rate typically 150-250 bpm",
            "P waves absent, buried in QRS, or retrograde after QRS",
            "Abrupt onset and termination",
            "May see pseudo-R' in V1 or pseudo-S in inferior leads",
        ], "(150-250 bpm)"),
        Vtach => entry(kind, "Ventricular Tachycardia", &[
            "Wide QRS complex >120ms",
            "Regular rhythm",
            "Slow VT: 100-150 bpm, Fast VT: >150 bpm",
            "AV dissociation (P waves march through)",
            "Fusion and capture beats",
            "Concordance in precordial leads",
        ], "(100-250: slow to fast VT)"),
        Vfib => entry(kind, "Ventricular Fibrillation", &[
            "Chaotic, irregular waveform",
            "No identifiable P waves, QRS, or T waves",
            "Varying amplitude and frequency",
            "No organized electrical activity",
            "Coarse vs fine based on amplitude",
        ], "(chaotic - no rate)"),
        Asystole => entry(kind, "Asystole", &[
            "Flat line - no electrical activity",
            "Confirm in multiple leads",
            "May see occasional P waves (ventricular standstill)",
            "Rule out fine VFib",
            "Check lead connections",
        ], "(no activity)"),
        FirstDegree => entry(kind, "1st Degree AV Block", &[
            "PR interval >200ms (>5 small squares)",
            "Every P wave conducts to ventricle",
            "Regular rhythm",
            "Constant PR interval",
            "Often benign, may be due to AV nodal disease or drugs",
        ], ""),
        Mobitz1 => entry(kind, "2nd Degree AV Block Type I (Wenckebach)", &[
            "Progressive PR prolongation until dropped QRS",
            "Grouped beating pattern",
            "Shortening R-R intervals before dropped beat",
            "PR after pause is shortest",
            "Usually AV nodal level - relatively benign",
        ], ""),
        Mobitz2 => entry(kind, "2nd Degree AV Block Type II", &[
            "Constant PR interval with intermittent dropped QRS",
            "No PR prolongation before dropped beat",
            "Often wide QRS (infranodal block)",
            "May progress to complete heart block",
            "Usually requires pacemaker",
        ], ""),
        ThirdDegree => entry(kind, "3rd Degree (Complete) Heart Block", &[
            "Complete AV dissociation",
            "P waves \"march through\" QRS complexes",
            "Regular P-P and R-R intervals but unrelated",
            "Junctional escape (≥40 bpm): narrow QRS, rate 40-60",
            "Ventricular escape (<40 bpm): wide QRS, rate 20-40",
            "Atrial rate > ventricular rate",
        ], "(20-60: vent to junctional escape)"),
        Rbbb => entry(kind, "Right Bundle Branch Block", &[
            "QRS ≥120ms",
            "RSR' pattern in V1-V2 (\"rabbit ears\" or \"M-shaped\")",
            "Wide slurred S wave in I, aVL, V5-V6",
            "ST-T changes opposite to terminal QRS deflection",
            "Normal axis",
        ], ""),
        Lbbb => entry(kind, "Left Bundle Branch Block", &[
            "QRS ≥120ms",
            "Broad notched R wave in I, aVL, V5-V6",
            "Deep QS or rS in V1-V3",
            "Absence of Q waves in lateral leads",
            "Appropriate discordance (ST opposite to QRS)",
            "Cannot interpret ischemia normally - use Sgarbossa criteria",
        ], ""),
        AnteriorStemi => entry(kind, "Anterior STEMI", &[
            "ST elevation in V1-V4 (anterior leads)",
            "Reciprocal ST depression in II, III, aVF",
            "LAD territory - large area at risk",
            "May see hyperacute T waves early",
            "Q waves develop over hours-days",
        ], ""),
        InferiorStemi => entry(kind, "Inferior STEMI", &[
            "ST elevation in II, III, aVF",
            "Reciprocal ST depression in I, aVL",
            "Usually RCA occlusion (III > II suggests RCA)",
            "Check V4R for RV involvement",
            "Watch for bradycardia and heart blocks",
        ], ""),
        LateralStemi => entry(kind, "Lateral STEMI", &[
            "ST elevation in I, aVL, V5-V6",
            "Reciprocal ST depression in II, III, aVF",
            "Circumflex or diagonal branch occlusion",
            "High lateral (I, aVL) may be subtle",
            "Often accompanies anterior or inferior STEMI",
        ], ""),
        PosteriorStemi => entry(kind, "Posterior STEMI", &[
            "ST depression in V1-V3 (reciprocal changes)",
            "Tall, broad R waves in V1-V3 (Q wave equivalent)",
            "Upright T waves in V1-V3",
            "ST elevation in V7-V9 (posterior leads)",
            "Often occurs with inferior STEMI",
        ], ""),
        Hyperkalemia => PathologyPreset {
            lead_overrides: HYPERKALEMIA,
            ..entry(kind, "Hyperkalemia", &[
                "Tall, peaked, narrow \"tented\" T waves (most dramatic in V2-V3)",
                "T wave height may exceed QRS amplitude",
                "Mildly widened QRS",
                "Flattened P waves",
                "Shortened QT interval",
                "Can progress to sine wave, then VFib/asystole if untreated",
            ], "")
        },
        Hypokalemia => entry(kind, "Hypokalemia", &[
            "Flattened T waves",
            "ST depression",
            "Prominent U waves (follows T wave)",
            "Prolonged QU interval",
            "T-U fusion at severe levels",
            "Increased risk of arrhythmias",
        ], ""),
        Pe => entry(kind, "Pulmonary Embolism", &[
            "Sinus tachycardia (most common finding)",
            "S1Q3T3 pattern (S in I, Q and inverted T in III)",
            "Right heart strain: T wave inversions V1-V4",
            "Right axis deviation",
            "New incomplete or complete RBBB",
            "Atrial fibrillation",
        ], "(100-150 bpm)"),
        Pericarditis => entry(kind, "Pericarditis", &[
            "Diffuse ST elevation with upward concavity",
            "PR depression (most specific finding)",
            "ST elevation in most leads except aVR and V1",
            "PR elevation in aVR",
            "No reciprocal ST changes",
            "Spodick sign (downsloping TP segment)",
        ], ""),
        Wpw => entry(kind, "WPW Syndrome", &[
            "Short PR interval <120ms",
            "Delta wave (slurred QRS upstroke)",
            "Wide QRS >100ms",
            "Secondary ST-T changes",
            "Pseudo-infarct patterns possible",
            "Risk of rapid conduction in AFib",
        ], ""),
        LongQt => PathologyPreset {
            global_defaults: LONG_QT,
            ..entry(kind, "Long QT Syndrome", &[
                "Prolonged QTc (>450ms men, >460ms women)",
                "Abnormal T wave morphology",
                "T wave notching or bifid T waves",
                "Risk of Torsades de Pointes",
                "May be congenital or acquired (drugs, electrolytes)",
            ], "")
        },
        Tamponade => entry(kind, "Cardiac Tamponade", &[
            "Low voltage QRS (<5mm in limb leads, <10mm in precordial)",
            "Electrical alternans (alternating QRS amplitude)",
            "Sinus tachycardia",
            "May see PR depression",
            "Beck's triad: hypotension, JVD, muffled heart sounds",
        ], "(100-140 bpm)"),
        Lgl => entry(kind, "Lown-Ganong-Levine (LGL)", &[
            "Short PR interval (<120ms)",
            "Normal QRS duration (<120ms)",
            "NO delta wave (unlike WPW)",
            "Bypass tract connects atria to bundle of His",
            "Risk of SVT",
        ], ""),
        EarlyRepol => entry(kind, "Early Repolarization", &[
            "J-point elevation (1-4mm)",
            "Concave upward ST elevation",
            "Notched or slurred J-point (\"fishhook\")",
            "Most prominent in V2-V5",
            "Common in young athletes - usually benign",
            "Diffuse pattern - not localized to coronary territory",
        ], ""),
        LaRaReversal => entry(kind, "LA-RA Lead Reversal", &[
            "Lead I completely inverted (most obvious clue)",
            "aVR and aVL appear switched",
            "Lead II and III appear switched",
            "Inverted P wave in lead I",
            "Precordial leads normal",
            "Most common lead reversal error",
        ], ""),
        LaLlReversal => entry(kind, "LA-LL Lead Reversal", &[
            "Lead III nearly flat/isoelectric",
            "Lead I and II appear similar",
            "aVL and aVF appear switched",
            "aVR relatively unchanged",
            "Precordial leads normal",
            "P wave changes in limb leads",
        ], ""),
        RaLlReversal => entry(kind, "RA-LL Lead Reversal", &[
            "Lead II nearly flat/isoelectric",
            "Lead I and III inverted",
            "aVR and aVF appear switched",
            "aVL relatively unchanged",
            "Precordial leads normal",
            "Creates bizarre axis",
        ], ""),
        PrecordialReversal => entry(kind, "V1-V2 Precordial Reversal", &[
            "Loss of normal R wave progression",
            "V1 and V2 appear switched",
            "V1 may show larger R wave than expected",
            "Limb leads normal",
            "Can mimic pathology if not recognized",
            "Check electrode placement",
        ], ""),
    }
}

/// Iterates over every catalog entry in catalog order.
pub fn all() -> impl Iterator<Item = PathologyPreset> {
    Pathology::ALL.into_iter().map(preset)
}
