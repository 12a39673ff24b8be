//! Angle helpers shared by the frame definitions.

use std::f64::consts::TAU;

/// Wrap an angle in radians into the half open range `[wrap - 2pi, wrap)`.
///
/// A wrap of `pi` gives longitudes in `[-pi, pi)`, a wrap of `2 pi` gives `[0, 2pi)`.
///
/// ```
///     use sunrot_core::util::wrap_angle;
///     use std::f64::consts::PI;
///
///     assert!((wrap_angle(3.0 * PI / 2.0, PI) + PI / 2.0).abs() < 1e-12);
///     assert!((wrap_angle(-PI / 2.0, 2.0 * PI) - 3.0 * PI / 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn wrap_angle(angle: f64, wrap: f64) -> f64 {
    let low = wrap - TAU;
    if (low..wrap).contains(&angle) {
        return angle;
    }
    let wrapped = (angle - low).rem_euclid(TAU) + low;
    // rem_euclid may round up to exactly TAU for tiny negative inputs.
    if wrapped >= wrap { wrapped - TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wrap_angle() {
        assert!(wrap_angle(0.0, PI) == 0.0);
        assert!((wrap_angle(PI, PI) + PI).abs() < 1e-12);
        assert!((wrap_angle(7.0, TAU) - (7.0 - TAU)).abs() < 1e-12);
        assert!((wrap_angle(-0.1, TAU) - (TAU - 0.1)).abs() < 1e-12);
        assert!(wrap_angle(-1e-20, TAU) < TAU);
    }
}
