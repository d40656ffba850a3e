//! Shaping primitives shared by every morphology.

/// Evaluates Gaussian bumps with the per-lead visual width and the per-beat
/// phase jitter applied.
///
/// `width_scale` widens every sigma without moving any wave; `shift` moves
/// every center by the same phase offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaper {
    /// Sigma multiplier (1.0 is nominal).
    pub width_scale: f64,
    /// Phase offset added to every center.
    pub shift: f64,
}

impl Default for Shaper {
    fn default() -> Self {
        Self {
            width_scale: 1.0,
            shift: 0.0,
        }
    }
}

impl Shaper {
    /// Creates a shaper.
    pub fn new(width_scale: f64, shift: f64) -> Self {
        Self { width_scale, shift }
    }

    /// Symmetric Gaussian bump.
    #[inline]
    pub fn gaussian(&self, x: f64, mean: f64, sigma: f64, amplitude: f64) -> f64 {
        let sigma = sigma * self.width_scale;
        if sigma == 0.0 {
            return 0.0;
        }
        let dx = x - (mean + self.shift);
        amplitude * (-(dx * dx) / (2.0 * sigma * sigma)).exp()
    }

    /// Gaussian whose descending side is widened (positive `descent`) or
    /// narrowed (negative `descent`) by `1 + descent * 0.7`.
    #[inline]
    pub fn asymmetric(&self, x: f64, mean: f64, sigma: f64, amplitude: f64, descent: f64) -> f64 {
        let base = sigma * self.width_scale;
        let dx = x - (mean + self.shift);
        let sigma = if dx <= 0.0 {
            base
        } else {
            base * (1.0 + descent * 0.7)
        };
        if sigma == 0.0 {
            return 0.0;
        }
        amplitude * (-(dx * dx) / (2.0 * sigma * sigma)).exp()
    }

    /// T wave with optional initial or terminal inversion.
    ///
    /// A positive `biphasic` factor places an opposite-polarity lobe after
    /// the primary (terminal inversion), a negative one before it. The
    /// primary shrinks by `|biphasic| * 0.2`.
    pub fn biphasic(
        &self,
        x: f64,
        position: f64,
        width: f64,
        amplitude: f64,
        descent: f64,
        biphasic: f64,
    ) -> f64 {
        let primary = self.asymmetric(x, position, width, amplitude, descent);
        let effect = biphasic.abs();
        if effect < 0.01 {
            return primary;
        }

        let direction = biphasic.signum();
        let secondary = self.asymmetric(
            x,
            position + direction * width * 1.2,
            width * 0.8,
            -amplitude * effect * 0.7,
            descent * 0.5,
        );
        primary * (1.0 - effect * 0.2) + secondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_gaussian_peak_and_shift() {
        let shaper = Shaper::default();
        assert!((shaper.gaussian(0.3, 0.3, 0.01, 0.7) - 0.7).abs() < EPS);

        let shifted = Shaper::new(1.0, 0.05);
        assert!((shifted.gaussian(0.35, 0.3, 0.01, 0.7) - 0.7).abs() < EPS);
        assert!(shifted.gaussian(0.3, 0.3, 0.01, 0.7) < 0.7);
    }

    #[test]
    fn test_zero_sigma_is_silent() {
        let shaper = Shaper::new(0.0, 0.0);
        assert_eq!(shaper.gaussian(0.3, 0.3, 0.01, 1.0), 0.0);
        assert_eq!(shaper.asymmetric(0.3, 0.3, 0.01, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_width_scale_broadens() {
        let narrow = Shaper::default().gaussian(0.32, 0.3, 0.01, 1.0);
        let wide = Shaper::new(2.0, 0.0).gaussian(0.32, 0.3, 0.01, 1.0);
        assert!(wide > narrow);
    }

    #[test]
    fn test_asymmetric_descent() {
        let shaper = Shaper::default();
        let symmetric = shaper.asymmetric(0.32, 0.3, 0.01, 1.0, 0.0);
        let slurred = shaper.asymmetric(0.32, 0.3, 0.01, 1.0, 1.0);
        let steep = shaper.asymmetric(0.32, 0.3, 0.01, 1.0, -1.0);
        assert!(slurred > symmetric && symmetric > steep);

        // Ascending side is unaffected.
        assert_eq!(
            shaper.asymmetric(0.28, 0.3, 0.01, 1.0, 1.0),
            shaper.asymmetric(0.28, 0.3, 0.01, 1.0, -1.0)
        );
    }

    #[test]
    fn test_biphasic() {
        let shaper = Shaper::default();
        let mono = shaper.biphasic(0.5, 0.5, 0.02, 1.0, 0.0, 0.005);
        assert!((mono - 1.0).abs() < EPS);

        let terminal = shaper.biphasic(0.524, 0.5, 0.02, 1.0, 0.0, 1.0);
        let initial = shaper.biphasic(0.476, 0.5, 0.02, 1.0, 0.0, -1.0);
        assert!(terminal < 0.0);
        assert!(initial < 0.0);

        let peak = shaper.biphasic(0.5, 0.5, 0.02, 1.0, 0.0, 0.5);
        assert!(peak < 1.0);
    }
}
