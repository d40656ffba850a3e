//! Primitive type definitions shared across the synthesis pipeline.

/// An instantaneous trace amplitude in millivolts.
pub type Voltage = f64;

/// A continuous time value in seconds, measured from the start of a strip.
pub type Seconds = f64;

/// A heart rate in beats per minute.
pub type Bpm = f64;

/// A clinically reported interval in whole milliseconds.
pub type Millis = u32;

/// A frontal-plane QRS axis in whole degrees.
pub type Degrees = i32;

/// Converts a rate in beats per minute to an RR interval in milliseconds.
#[inline]
pub fn rr_ms(hr: Bpm) -> f64 {
    60_000.0 / hr
}

/// Converts a rate in beats per minute to a cycle length in seconds.
#[inline]
pub fn cycle_seconds(hr: Bpm) -> Seconds {
    60.0 / hr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversions() {
        assert!((rr_ms(75.0) - 800.0).abs() < 1e-9);
        assert!((cycle_seconds(60.0) - 1.0).abs() < 1e-12);
    }
}
