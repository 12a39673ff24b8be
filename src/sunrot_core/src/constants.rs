//! # Constants
//! Constants used throughout the crate.
//!
//! Angles are stored in degrees here and converted where they are used, as that is
//! the unit in which the references quote them.

/// Rotation model used when a rotated frame does not specify one.
pub const DEFAULT_ROTATION_MODEL: &str = "howard";

/// Number of seconds in a day.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// J2000 epoch as a Julian Date in TDB.
pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of the start of Carrington rotation 1, 1853 November 9.
pub const CARRINGTON_EPOCH_JD: f64 = 2398220.0;

/// Sidereal period of the Carrington coordinate system in days.
pub const CARRINGTON_SIDEREAL_PERIOD: f64 = 25.38;

/// Inclination of the solar equator to the ecliptic in degrees.
pub const SOLAR_EQUATOR_INCLINATION: f64 = 7.25;

/// Mean rate at which Earth advances in heliocentric longitude in degrees per day.
///
/// Used to convert sidereal rotation rates to rates as seen from Earth.
pub const EARTH_ORBITAL_RATE: f64 = 0.9856;
