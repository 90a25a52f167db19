//! Rounding and clamping used wherever friction numbers are derived.

/// Round to `places` decimals, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to the nearest integer, then clamp into `[min, max]`.
///
/// Out-of-range floats saturate. When `min > max` the lower bound wins.
pub fn clamp_int(value: f64, min: i64, max: i64) -> i64 {
    (value.round() as i64).min(max).max(min)
}

/// Clamp into `[min, max]`; the lower bound wins when `min > max`.
pub fn clamp_float(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(clamp_int(4.5, 3, 10), 5);
        assert_eq!(clamp_int(90.000_000_000_01, 30, 420), 90);
        assert_eq!(clamp_int(1.2, 3, 10), 3);
        assert_eq!(clamp_int(99.0, 3, 10), 10);
    }

    #[test]
    fn rounds_to_places() {
        assert_eq!(round_to(0.7 - 0.1, 2), 0.6);
        assert_eq!(round_to(0.094_274_9, 5), 0.09427);
        assert_eq!(round_to(1.234_56, 3), 1.235);
    }

    #[test]
    fn clamps_floats() {
        assert_eq!(clamp_float(-0.2, 0.1, 1.0), 0.1);
        assert_eq!(clamp_float(1.4, 0.1, 1.0), 1.0);
        assert_eq!(clamp_float(0.5, 0.1, 1.0), 0.5);
    }

    #[test]
    fn inverted_bounds_yield_lower_bound() {
        assert_eq!(clamp_int(90.0, 30, 20), 30);
        assert_eq!(clamp_int(5.0, 30, 20), 30);
        assert_eq!(clamp_float(0.5, 0.9, 0.2), 0.9);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(clamp_int(1e30, 1, 10), 10);
        assert_eq!(clamp_int(-1e30, 0, 60), 0);
        assert_eq!(clamp_int(i64::MAX as f64 + 2.0, 1, 10), 10);
    }
}
