//! Orientation of the Sun as seen from the Earth.
//!
//! These are the low precision expressions from:
//!     "Astronomical Algorithms", 2nd edition, Jean Meeus, 1998.
//!     Chapters 25 (solar coordinates) and 29 (ephemeris for physical observations
//!     of the Sun).
//!
//! Accuracy is on the order of 0.01 degrees, which is well below the uncertainty of
//! any differential rotation model.
//!
//! Angles returned here are in radians, all inputs are TDB scaled times.
//!
use std::f64::consts::{PI, TAU};

use crate::constants::{
    CARRINGTON_EPOCH_JD, CARRINGTON_SIDEREAL_PERIOD, DAYS_PER_CENTURY, J2000_JD,
    SOLAR_EQUATOR_INCLINATION,
};
use crate::time::{TDB, Time};

/// Julian centuries since J2000.
#[inline(always)]
fn centuries(time: Time<TDB>) -> f64 {
    (time.jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Geometric mean anomaly of the Sun in radians.
fn mean_anomaly(t: f64) -> f64 {
    (357.52911 + t * (35999.05029 - 0.0001537 * t)).to_radians()
}

/// Apparent geocentric ecliptic longitude of the Sun, corrected for aberration.
#[must_use]
pub fn sun_apparent_longitude(time: Time<TDB>) -> f64 {
    let t = centuries(time);
    let l0 = 280.46646 + t * (36000.76983 + 0.0003032 * t);
    let m = mean_anomaly(t);

    // equation of the center
    let c = (1.914602 - t * (0.004817 + 0.000014 * t)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let omega = (125.04 - 1934.136 * t).to_radians();
    (l0 + c - 0.00569 - 0.00478 * omega.sin())
        .to_radians()
        .rem_euclid(TAU)
}

/// Distance between the Sun and the Earth in AU.
#[must_use]
pub fn sun_earth_distance(time: Time<TDB>) -> f64 {
    let t = centuries(time);
    let m = mean_anomaly(t);
    let e = 0.016708634 - t * (0.000042037 + 0.0000001267 * t);

    let c = ((1.914602 - t * (0.004817 + 0.000014 * t)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin())
    .to_radians();

    1.000001018 * (1.0 - e * e) / (1.0 + e * (m + c).cos())
}

/// Longitude of the ascending node of the solar equator on the ecliptic.
#[must_use]
pub fn solar_ascending_node(time: Time<TDB>) -> f64 {
    (73.6667 + 1.3958333 * (time.jd - 2396758.0) / DAYS_PER_CENTURY).to_radians()
}

/// Position of the Earth in the heliocentric inertial frame.
///
/// Returns the (longitude, latitude) of the Earth as seen from the center of the
/// Sun, where longitude is measured in the solar equator from its ascending node
/// on the ecliptic. The latitude is the B0 angle.
#[must_use]
pub fn earth_inertial_position(time: Time<TDB>) -> (f64, f64) {
    let inclination = SOLAR_EQUATOR_INCLINATION.to_radians();
    let (sin_i, cos_i) = inclination.sin_cos();

    // heliocentric longitude of the earth relative to the node
    let theta = sun_apparent_longitude(time) + PI - solar_ascending_node(time);
    let (sin_theta, cos_theta) = theta.sin_cos();

    let lon = (sin_theta * cos_i).atan2(cos_theta).rem_euclid(TAU);
    let lat = (-sin_theta * sin_i).asin();
    (lon, lat)
}

/// Heliographic latitude of the center of the solar disk as seen from Earth.
#[must_use]
pub fn b0(time: Time<TDB>) -> f64 {
    earth_inertial_position(time).1
}

/// Angle the Carrington prime meridian has rotated through, measured from the
/// ascending node of the solar equator.
///
/// The Carrington system rotates rigidly with a sidereal period of 25.38 days.
#[must_use]
pub fn carrington_rotation_angle(time: Time<TDB>) -> f64 {
    ((time.jd - CARRINGTON_EPOCH_JD) * 360.0 / CARRINGTON_SIDEREAL_PERIOD)
        .rem_euclid(360.0)
        .to_radians()
}

/// Carrington longitude of the center of the solar disk as seen from Earth (L0).
#[must_use]
pub fn carrington_longitude(time: Time<TDB>) -> f64 {
    (earth_inertial_position(time).0 - carrington_rotation_angle(time)).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeus_example() {
        // Example 29.a, 1992 October 13.0 TD
        let time = Time::<TDB>::new(2448908.5);
        assert!((b0(time).to_degrees() - 5.99).abs() < 0.05);
        assert!((carrington_longitude(time).to_degrees() - 238.63).abs() < 0.05);
    }

    #[test]
    fn test_b0_range() {
        for offset in 0..36 {
            let time = Time::<TDB>::new(J2000_JD + 10.0 * f64::from(offset));
            assert!(
                b0(time).to_degrees().abs() <= 7.26,
                "B0 = {} degrees",
                b0(time).to_degrees()
            );
        }
    }

    #[test]
    fn test_earth_distance() {
        for offset in 0..36 {
            let time = Time::<TDB>::new(J2000_JD + 10.0 * f64::from(offset));
            let dist = sun_earth_distance(time);
            assert!((0.983..=1.017).contains(&dist), "distance = {dist}");
        }
    }

    #[test]
    fn test_carrington_period() {
        let time = Time::<TDB>::new(J2000_JD);
        let later = Time::<TDB>::new(J2000_JD + CARRINGTON_SIDEREAL_PERIOD);
        let diff = carrington_rotation_angle(later) - carrington_rotation_angle(time);
        assert!(diff.abs() < 1e-8);
    }
}
