//! Deterministic beat-to-beat variability.
//!
//! Each beat index is hashed into seven values in [0, 1) with the classic
//! `fract(sin(n * k) * 43758.5453)` construction. There is no generator
//! state: the same beat index and irregularity always give the same
//! multipliers.

/// Per-draw hash constants.
pub const BEAT_HASH_KEYS: [f64; 7] = [12.9898, 78.233, 45.164, 93.989, 27.617, 61.432, 84.567];

/// Hash multiplier.
pub const BEAT_HASH_SCALE: f64 = 43758.5453;

/// Returns the seven pseudo-random draws for `beat`, each in [0, 1).
pub fn beat_draws(beat: i64) -> [f64; 7] {
    let n = beat as f64;
    BEAT_HASH_KEYS.map(|k| {
        let seed = (n * k).sin() * BEAT_HASH_SCALE;
        seed - seed.floor()
    })
}

/// Multipliers applied to one beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatVariability {
    /// Whole-beat amplitude multiplier.
    pub amplitude: f64,
    /// T wave amplitude multiplier.
    pub t_amplitude: f64,
    /// P wave amplitude multiplier.
    pub p_amplitude: f64,
    /// QRS (and P/T sigma) width multiplier.
    pub qrs_width: f64,
    /// Phase jitter added to every wave center.
    pub shift: f64,
}

impl BeatVariability {
    /// No variation.
    pub const IDENTITY: BeatVariability = BeatVariability {
        amplitude: 1.0,
        t_amplitude: 1.0,
        p_amplitude: 1.0,
        qrs_width: 1.0,
        shift: 0.0,
    };

    /// Derives the multipliers for `beat` at `irregularity` percent.
    ///
    /// Returns [`BeatVariability::IDENTITY`] when irregularity is not
    /// positive.
    pub fn for_beat(beat: i64, irregularity: f64) -> Self {
        if irregularity <= 0.0 {
            return Self::IDENTITY;
        }
        let gate = irregularity / 100.0;
        let [r1, r2, r3, r4, r5, r6, r7] = beat_draws(beat);

        let mut amplitude = 1.0 + (r1 - 0.5) * gate;
        let mut t_amplitude = 1.0 + (r3 - 0.5) * 0.8 * gate;

        // Occasional surge or dip across QRS and T together.
        if r5 > 0.80 {
            amplitude *= 0.5 + r5 * 0.8;
            t_amplitude *= 0.6 + r7 * 0.6;
        }
        // Rare small beat.
        if r7 > 0.95 {
            amplitude *= 0.5;
        }

        Self {
            amplitude,
            t_amplitude,
            p_amplitude: 1.0 + (r6 - 0.5) * 0.6 * gate,
            qrs_width: 1.0 + (r4 - 0.5) * 0.4 * gate,
            shift: (r2 - 0.5) * 0.12 * gate,
        }
    }
}

impl Default for BeatVariability {
    fn default() -> Self {
        Self::IDENTITY
    }
}
