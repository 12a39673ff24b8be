//! # Differential Rotation
//! Solar rotation rates as a function of latitude.
//!
//! The Sun does not rotate as a rigid body, the equator completes a rotation in
//! roughly 25 days while the poles take closer to 35. Each rotation model here maps
//! a heliographic latitude in radians to a sidereal angular rate in radians per
//! day, of the form `A + B sin^2(lat) + C sin^4(lat)`.
//!
//! Models are stored in the global [`ROTATION_MODELS`] registry by name. Entries are
//! never replaced once registered.
//!
//! Built in models:
//!
//! - `howard`: Howard, Harvey, and Forgach, Solar Physics 130, 1990, magnetic
//!   features.
//! - `snodgrass`: Snodgrass and Ulrich, Astrophysical Journal 351, 1990, Doppler
//!   velocities.
//! - `allen`: Allen, Astrophysical Quantities, 1973, sunspots.
//! - `rigid`: Rigid rotation at the Carrington rate.
//!
use std::collections::HashMap;

use crossbeam::sync::ShardedLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_ORBITAL_RATE, SECONDS_PER_DAY};
use crate::errors::{Error, SunrotResult};
use crate::time::{Duration, TDB};

/// Sidereal rotation rate in radians per day as a function of latitude in radians.
pub type RateFn = fn(f64) -> f64;

/// Reference frame in which rotation angles are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameTime {
    /// Relative to the fixed stars.
    Sidereal,

    /// As seen from the Earth, which advances in the same direction as the solar
    /// rotation.
    Synodic,
}

/// A + B sin^2 + C sin^4 in the units of the coefficients.
#[inline(always)]
fn sin_series(a: f64, b: f64, c: f64, lat: f64) -> f64 {
    let sin2 = lat.sin().powi(2);
    a + sin2 * (b + c * sin2)
}

/// Coefficients given in micro-radians per second.
fn from_microrad_per_sec(a: f64, b: f64, c: f64, lat: f64) -> f64 {
    sin_series(a, b, c, lat) * 1e-6 * SECONDS_PER_DAY
}

/// Coefficients given in degrees per day.
fn from_deg_per_day(a: f64, b: f64, c: f64, lat: f64) -> f64 {
    sin_series(a, b, c, lat).to_radians()
}

fn howard(lat: f64) -> f64 {
    from_microrad_per_sec(2.894, -0.428, -0.370, lat)
}

fn snodgrass(lat: f64) -> f64 {
    from_microrad_per_sec(2.851, -0.343, -0.474, lat)
}

fn allen(lat: f64) -> f64 {
    from_deg_per_day(14.44, -3.0, 0.0, lat)
}

fn rigid(lat: f64) -> f64 {
    from_deg_per_day(14.1844, 0.0, 0.0, lat)
}

/// Registry of rotation models by name.
pub static ROTATION_MODELS: std::sync::LazyLock<ShardedLock<HashMap<String, RateFn>>> =
    std::sync::LazyLock::new(|| {
        let builtin: [(&str, RateFn); 4] = [
            ("howard", howard),
            ("snodgrass", snodgrass),
            ("allen", allen),
            ("rigid", rigid),
        ];
        ShardedLock::new(
            builtin
                .into_iter()
                .map(|(name, func)| (name.to_string(), func))
                .collect(),
        )
    });

/// Look up the rate function of a model.
///
/// # Errors
/// [`Error::UnknownModel`] if no model of that name is registered.
pub fn rate_function(model: &str) -> SunrotResult<RateFn> {
    ROTATION_MODELS
        .read()?
        .get(model)
        .copied()
        .ok_or_else(|| Error::UnknownModel(format!("Unknown rotation model '{model}'.")))
}

/// Sidereal rotation rate of a model at a latitude, in radians per day.
///
/// ```
///     use sunrot_core::diff_rot::rotation_rate;
///
///     let rate = rotation_rate("howard", 0.0).unwrap().to_degrees();
///     assert!((rate - 14.33).abs() < 0.01);
///     assert!(rotation_rate("unknown", 0.0).is_err());
/// ```
///
/// # Errors
/// [`Error::UnknownModel`] if no model of that name is registered.
pub fn rotation_rate(model: &str, lat: f64) -> SunrotResult<f64> {
    Ok(rate_function(model)?(lat))
}

/// Register a new rotation model.
///
/// # Errors
/// [`Error::ValueError`] if a model of that name already exists.
pub fn register_rotation_model(name: &str, rate: RateFn) -> SunrotResult<()> {
    let mut models = ROTATION_MODELS.write()?;
    if models.contains_key(name) {
        return Err(Error::ValueError(format!(
            "Rotation model '{name}' is already registered."
        )));
    }
    let _ = models.insert(name.to_string(), rate);
    Ok(())
}

/// Names of all registered models, sorted.
///
/// # Errors
/// Fails if the registry lock is poisoned.
pub fn rotation_models() -> SunrotResult<Vec<String>> {
    let mut names: Vec<String> = ROTATION_MODELS.read()?.keys().cloned().collect();
    names.sort();
    Ok(names)
}

/// Rotation of the rate function over a number of days.
fn rotation_angle(rate: RateFn, days: f64, lat: f64, frame_time: FrameTime) -> f64 {
    let rate = match frame_time {
        FrameTime::Sidereal => rate(lat),
        FrameTime::Synodic => rate(lat) - EARTH_ORBITAL_RATE.to_radians(),
    };
    rate * days
}

/// Angle in radians a feature at the given latitude rotates through over a duration.
///
/// Positive durations give prograde rotation (increasing longitude).
///
/// # Errors
/// [`Error::UnknownModel`] if no model of that name is registered.
pub fn diff_rot(
    duration: Duration<TDB>,
    lat: f64,
    model: &str,
    frame_time: FrameTime,
) -> SunrotResult<f64> {
    let rate = rate_function(model)?;
    Ok(rotation_angle(rate, duration.days(), lat, frame_time))
}

/// Rotation angles of many features.
///
/// The durations are either a single value applied to all latitudes, or one value
/// per latitude.
///
/// # Errors
/// [`Error::UnknownModel`] if no model of that name is registered.
/// [`Error::ValueError`] if the durations cannot be broadcast against the latitudes.
pub fn diff_rot_many(
    durations: &[Duration<TDB>],
    lats: &[f64],
    model: &str,
    frame_time: FrameTime,
) -> SunrotResult<Vec<f64>> {
    let rate = rate_function(model)?;
    match durations {
        [duration] => {
            let days = duration.days();
            Ok(lats
                .par_iter()
                .with_min_len(1000)
                .map(|lat| rotation_angle(rate, days, *lat, frame_time))
                .collect())
        }
        _ if durations.len() == lats.len() => Ok(durations
            .par_iter()
            .zip(lats)
            .with_min_len(1000)
            .map(|(duration, lat)| rotation_angle(rate, duration.days(), *lat, frame_time))
            .collect()),
        _ => Err(Error::ValueError(format!(
            "Cannot broadcast {} durations against {} latitudes.",
            durations.len(),
            lats.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CARRINGTON_SIDEREAL_PERIOD;

    fn wide_rate(lat: f64) -> f64 {
        1.0 + lat
    }

    #[test]
    fn test_builtin_models() {
        let names = rotation_models().unwrap();
        for name in ["allen", "howard", "rigid", "snodgrass"] {
            assert!(names.contains(&name.to_string()));
        }

        // Equatorial rates of roughly 14.3 degrees per day.
        assert!((rotation_rate("howard", 0.0).unwrap().to_degrees() - 14.326).abs() < 0.01);
        assert!((rotation_rate("snodgrass", 0.0).unwrap().to_degrees() - 14.113).abs() < 0.01);
        assert!((rotation_rate("allen", 0.0).unwrap().to_degrees() - 14.44).abs() < 1e-10);

        let rigid = rotation_rate("rigid", 0.5).unwrap().to_degrees();
        assert!((rigid - 360.0 / CARRINGTON_SIDEREAL_PERIOD).abs() < 1e-4);
    }

    #[test]
    fn test_differential() {
        // Higher latitudes rotate slower, symmetric about the equator.
        for model in ["howard", "snodgrass", "allen"] {
            let eq = rotation_rate(model, 0.0).unwrap();
            let mid = rotation_rate(model, 0.5).unwrap();
            let south = rotation_rate(model, -0.5).unwrap();
            assert!(mid < eq);
            assert!((mid - south).abs() < 1e-15);
        }
    }

    #[test]
    fn test_unknown_model() {
        assert!(matches!(
            rotation_rate("not_a_model", 0.0),
            Err(Error::UnknownModel(_))
        ));
        assert!(matches!(
            diff_rot(Duration::zero(), 0.0, "not_a_model", FrameTime::Sidereal),
            Err(Error::UnknownModel(_))
        ));
    }

    #[test]
    fn test_register() {
        register_rotation_model("diff_rot_test_wide", wide_rate).unwrap();
        assert!(rotation_rate("diff_rot_test_wide", 1.0).unwrap() == 2.0);
        assert!(matches!(
            register_rotation_model("diff_rot_test_wide", wide_rate),
            Err(Error::ValueError(_))
        ));
        assert!(matches!(
            register_rotation_model("howard", wide_rate),
            Err(Error::ValueError(_))
        ));
    }

    #[test]
    fn test_diff_rot() {
        let day = Duration::<TDB>::new(1.0);
        let sidereal = diff_rot(day, 0.0, "allen", FrameTime::Sidereal).unwrap();
        let synodic = diff_rot(day, 0.0, "allen", FrameTime::Synodic).unwrap();
        assert!((sidereal.to_degrees() - 14.44).abs() < 1e-10);
        assert!((sidereal - synodic - EARTH_ORBITAL_RATE.to_radians()).abs() < 1e-12);

        let back = diff_rot(-day, 0.0, "allen", FrameTime::Sidereal).unwrap();
        assert!(back == -sidereal);
        assert!(diff_rot(Duration::zero(), 0.3, "howard", FrameTime::Sidereal).unwrap() == 0.0);
    }

    #[test]
    fn test_diff_rot_many() {
        let lats = [0.0, 0.1, 0.2];
        let single = diff_rot_many(&[Duration::new(2.0)], &lats, "howard", FrameTime::Sidereal)
            .unwrap();
        let each = diff_rot_many(
            &[Duration::new(2.0), Duration::new(0.0), Duration::new(-2.0)],
            &lats,
            "howard",
            FrameTime::Sidereal,
        )
        .unwrap();
        assert!(single.len() == 3);
        assert!(single[0] == each[0]);
        assert!(each[1] == 0.0);
        assert!(each[2] == -single[2]);

        assert!(matches!(
            diff_rot_many(
                &[Duration::new(1.0), Duration::new(2.0)],
                &lats,
                "howard",
                FrameTime::Sidereal
            ),
            Err(Error::ValueError(_))
        ));
    }
}
