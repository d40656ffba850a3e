//! Layered recording artifact.
//!
//! The artifact is a sum of deterministic sinusoids (baseline wander, drift,
//! muscle tremor, mains interference, electrode jumps) and a few terms that
//! draw from an injected [`NoiseSource`] (random noise, contact scratch,
//! motion spikes). Everything scales linearly with the artifact level.

use crate::utils::Random;
use std::f64::consts::PI;

/// Source of uniform draws in [0, 1) for the random artifact terms.
pub trait NoiseSource {
    /// Returns the next uniform value in [0, 1).
    fn uniform(&mut self) -> f64;
}

/// Unseeded noise from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadNoise;

impl NoiseSource for ThreadNoise {
    fn uniform(&mut self) -> f64 {
        rand::random()
    }
}

/// Reproducible noise from a seeded generator.
#[derive(Debug, Clone, Default)]
pub struct SeededNoise {
    rng: Random,
}

impl SeededNoise {
    /// Creates a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Random::new(seed),
        }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Number of uniforms drawn so far.
    pub fn draws(&self) -> u64 {
        self.rng.steps()
    }
}

impl NoiseSource for SeededNoise {
    fn uniform(&mut self) -> f64 {
        self.rng.get_real64()
    }
}

/// A source that always returns 0.5, which zeroes every centered random
/// term. Useful for tests and for noise-free rendering at a nonzero
/// artifact level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNoise;

impl NoiseSource for NullNoise {
    fn uniform(&mut self) -> f64 {
        0.5
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// The individual artifact terms at one instant, already scaled by the
/// artifact level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArtifactComponents {
    /// Respiratory baseline wander.
    pub baseline_wander: f64,
    /// Very slow baseline drift.
    pub slow_drift: f64,
    /// EMG tremor.
    pub muscle: f64,
    /// 60 Hz power line interference.
    pub mains: f64,
    /// Broadband random noise.
    pub random: f64,
    /// Electrode contact scratch.
    pub contact: f64,
    /// Electrode movement steps.
    pub baseline_jump: f64,
    /// Motion spikes.
    pub motion_spike: f64,
    /// Fraction of the clean signal lost to intermittent disconnection.
    pub disconnect_gain: f64,
}

impl ArtifactComponents {
    /// Sum of the additive terms.
    pub fn additive(&self) -> f64 {
        self.baseline_wander
            + self.slow_drift
            + self.muscle
            + self.mains
            + self.random
            + self.contact
            + self.baseline_jump
            + self.motion_spike
    }

    /// Total artifact for a clean sample `value`.
    pub fn total(&self, value: f64) -> f64 {
        self.additive() - value * self.disconnect_gain
    }
}

/// Power line frequency (Hz).
pub const MAINS_HZ: f64 = 60.0;

/// Composes recording artifact on top of a clean sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactCompositor;

impl ArtifactCompositor {
    /// Creates a compositor.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every artifact term at raw time `t` for `level` percent.
    pub fn components<N: NoiseSource + ?Sized>(
        &self,
        t: f64,
        level: f64,
        noise: &mut N,
    ) -> ArtifactComponents {
        let f = level / 100.0;

        let baseline_wander =
            f * 0.5 * ((t * 0.25).sin() * 0.5 + (t * 0.4).sin() * 0.3 + (t * 0.15).sin() * 0.2);
        let slow_drift = f * 0.3 * (t * 0.08).sin();
        let muscle = f
            * 0.35
            * ((t * 47.0).sin() * 0.25
                + (t * 63.0).sin() * 0.2
                + (t * 89.0).sin() * 0.2
                + (t * 37.0).sin() * 0.15
                + (t * 113.0).sin() * 0.1
                + (t * 157.0).sin() * 0.1);
        let mains = f * 0.15 * (t * MAINS_HZ * 2.0 * PI).sin();
        let random = f * 0.18 * (noise.uniform() - 0.5);
        let contact = f
            * 0.1
            * (noise.uniform() * (t * 200.0).sin() + noise.uniform() * (t * 350.0).sin() * 0.5);

        let step = |phase: f64, threshold: f64, size: f64| {
            if phase > threshold {
                size
            } else if phase < -threshold {
                -size
            } else {
                0.0
            }
        };
        let baseline_jump =
            f * 0.25 * (step((t * 0.5).sin(), 0.92, 1.0) + step((t * 0.7).sin(), 0.94, 0.7));

        // Spike uniforms are only drawn while a spike window is open.
        let mut spike = |phase: f64, threshold: f64, size: f64| {
            if phase > threshold {
                (noise.uniform() - 0.5) * size
            } else {
                0.0
            }
        };
        let motion_spike = f
            * 0.5
            * (spike((t * 1.7).sin(), 0.96, 2.0)
                + spike((t * 2.3).sin(), 0.95, 2.0)
                + spike((t * 3.1).sin(), 0.97, 1.5));

        let disconnect_gain = if (t * 0.3).sin() > 0.98 { f * 0.8 } else { 0.0 };

        ArtifactComponents {
            baseline_wander,
            slow_drift,
            muscle,
            mains,
            random,
            contact,
            baseline_jump,
            motion_spike,
            disconnect_gain,
        }
    }

    /// Returns `value` with artifact applied. A non-positive level returns
    /// `value` unchanged and draws nothing from `noise`.
    pub fn apply<N: NoiseSource + ?Sized>(
        &self,
        value: f64,
        t: f64,
        level: f64,
        noise: &mut N,
    ) -> f64 {
        if level <= 0.0 {
            return value;
        }
        value + self.components(t, level, noise).total(value)
    }
}
